#![forbid(unsafe_code)]

//! Per-object size attribution for Maya ASCII scene dumps.
//!
//! # Role in Scene Sniffer
//! `sniff-stats` is the input layer. It walks the physical lines of a `.ma`
//! file once, recognises the handful of statement shapes that matter for
//! size attribution, and returns a [`ParsedStats`] snapshot that the
//! presentation layer sorts and lays out.
//!
//! # Primary responsibilities
//! - **Statement classification**: [`classify`] maps a raw line to a
//!   [`Statement`].
//! - **Attribution**: [`parse`] charges every attribute and continuation line
//!   to the most recently created node, until the first `select` or
//!   `connectAttr` statement.
//! - **Whole-file totals**: line and character totals always cover the full
//!   input, independent of where attribution stopped.
//!
//! # Example
//! ```
//! use sniff_stats::parse;
//!
//! let lines = [
//!     "createNode transform -n \"pCube1\";",
//!     "setAttr \".tx\" 5;",
//!     "select -r pCube1;",
//! ];
//! let stats = parse(lines, 64).unwrap();
//! assert_eq!(stats.line_count, 3);
//! assert_eq!(stats.objects["pCube1"].line_count, 1);
//! ```

pub mod parse;
pub mod statement;

pub use parse::{ObjectStats, ParseError, ParsedStats, parse, parse_source};
pub use statement::{NodeDecl, Statement, classify, parse_create};
