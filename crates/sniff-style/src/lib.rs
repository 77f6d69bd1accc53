#![forbid(unsafe_code)]

//! Presentation styling for Scene Sniffer tiles.
//!
//! This crate provides:
//! - [`Rgb`] with hex parsing/formatting and HSV lightening
//! - [`TypePalette`] mapping free-form node types to colours, with a
//!   fallback for types it has never seen
//! - [`Scale`] for display-density scaling, computed once and passed around

/// RGB colour math.
pub mod color;
/// Node-type palette and per-tile styles.
pub mod palette;
/// Display-density scale.
pub mod scale;

pub use color::{ParseColorError, Rgb};
pub use palette::{FALLBACK_COLOR, TileStyle, TypePalette};
pub use scale::Scale;
