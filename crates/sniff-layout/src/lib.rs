#![forbid(unsafe_code)]

//! Squarified treemap layout.
//!
//! Turns an ordered list of positive weights into rectangles whose areas are
//! proportional to the weights and whose aspect ratios stay close to square
//! (Bruls, Huizing & van Wijk).
//!
//! # Pipeline
//! 1. [`normalize_sizes`] floors tiny weights and rescales so the weights sum
//!    to the target area.
//! 2. [`squarify`] (or [`compute`], taking loose coordinates) tiles the
//!    target rectangle, one rectangle per weight, in input order.
//! 3. [`padded_squarify`] additionally insets each rectangle to leave gutters.
//!
//! [`Treemap`] bundles the three steps behind a builder.
//!
//! # Example
//!
//! ```
//! use sniff_layout::{Rect, normalize_sizes, squarify};
//!
//! let bounds = Rect::new(0.0, 0.0, 4.0, 4.0);
//! let sizes = normalize_sizes(&[1.0, 1.0, 1.0, 1.0], bounds.width, bounds.height, 0.01).unwrap();
//! let rects = squarify(&sizes, bounds).unwrap();
//! assert_eq!(rects[0], Rect::new(0.0, 0.0, 2.0, 2.0));
//! assert_eq!(rects[3], Rect::new(2.0, 2.0, 2.0, 2.0));
//! ```

pub mod geometry;
pub mod treemap;

pub use geometry::{Direction, Rect};
pub use treemap::{
    DEFAULT_MINIMUM_SIZE_RATIO, DEFAULT_PADDING, LayoutError, Treemap, compute,
    normalize_sizes, pad_rect, padded_squarify, squarify,
};
