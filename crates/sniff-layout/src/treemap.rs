#![forbid(unsafe_code)]

//! Squarified treemap: normalization, strip layout and padding.
//!
//! The layout walks the weights front to back. Each step grows a strip along
//! the shorter side of the remaining rectangle for as long as the strip's
//! worst aspect ratio does not get worse, lays the strip out, and continues
//! with the leftover rectangle. Ties extend the strip.

use core::fmt;

use tracing::{debug, instrument, trace};

use crate::geometry::{Direction, Rect};

/// Default floor, as a fraction of the largest weight, applied by
/// [`normalize_sizes`].
pub const DEFAULT_MINIMUM_SIZE_RATIO: f64 = 0.01;

/// Default inset applied to each side by [`padded_squarify`].
pub const DEFAULT_PADDING: f64 = 1.0;

/// Relative slack allowed between the weight total and the bounds area.
const AREA_TOLERANCE: f64 = 1e-9;

/// Layout failure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutError {
    /// A weight is non-positive or non-finite where a positive one is
    /// required (or every raw weight is zero), or is too small for its tile
    /// to keep a positive extent.
    InvalidWeight {
        /// Position of the offending weight in the input slice.
        index: usize,
        /// The weight as given.
        value: f64,
    },
    /// Non-empty weights with a non-positive or non-finite target extent.
    DegenerateBounds {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },
    /// Weights handed to [`squarify`] do not sum to the bounds area.
    AreaMismatch {
        /// Sum of the weights.
        total: f64,
        /// `width * height` of the bounds.
        area: f64,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWeight { index, value } => {
                write!(f, "invalid weight at index {index}: {value}")
            }
            Self::DegenerateBounds { width, height } => {
                write!(f, "degenerate layout bounds: {width}x{height}")
            }
            Self::AreaMismatch { total, area } => {
                write!(f, "weights sum to {total} but bounds area is {area}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// Floor tiny weights and rescale so they sum to `width * height`.
///
/// Every weight below `minimum_size_ratio * max(weights)` is raised to that
/// floor first, so dominant entries cannot squeeze the rest to nothing.
///
/// # Errors
///
/// [`LayoutError::InvalidWeight`] for a negative or non-finite weight, or
/// when every weight is zero. [`LayoutError::DegenerateBounds`] for a
/// non-positive target area.
pub fn normalize_sizes(
    weights: &[f64],
    width: f64,
    height: f64,
    minimum_size_ratio: f64,
) -> Result<Vec<f64>, LayoutError> {
    if weights.is_empty() {
        return Ok(Vec::new());
    }
    check_bounds(width, height)?;
    if let Some((index, &value)) = weights
        .iter()
        .enumerate()
        .find(|(_, w)| !w.is_finite() || **w < 0.0)
    {
        return Err(LayoutError::InvalidWeight { index, value });
    }

    let peak = weights.iter().copied().fold(0.0_f64, f64::max);
    if peak <= 0.0 {
        return Err(LayoutError::InvalidWeight {
            index: 0,
            value: weights[0],
        });
    }

    let floor = peak * minimum_size_ratio;
    let floored: Vec<f64> = weights.iter().map(|&w| w.max(floor)).collect();
    let total: f64 = floored.iter().sum();
    let area = width * height;
    Ok(floored.into_iter().map(|w| w * area / total).collect())
}

/// Tile `bounds` with one rectangle per weight, in input order.
///
/// Weights are areas; callers scale them to `bounds.area()` first (see
/// [`normalize_sizes`]).
///
/// # Errors
///
/// - [`LayoutError::InvalidWeight`] for a weight that is not positive and
///   finite, or one whose tile collapses to a zero extent.
/// - [`LayoutError::DegenerateBounds`] for unusable bounds.
/// - [`LayoutError::AreaMismatch`] when the weights do not sum to
///   `bounds.area()`.
#[instrument(skip(weights), fields(count = weights.len()), level = "debug")]
pub fn squarify(weights: &[f64], bounds: Rect) -> Result<Vec<Rect>, LayoutError> {
    if weights.is_empty() {
        return Ok(Vec::new());
    }
    check_bounds(bounds.width, bounds.height)?;
    if let Some((index, &value)) = weights
        .iter()
        .enumerate()
        .find(|(_, w)| !w.is_finite() || **w <= 0.0)
    {
        return Err(LayoutError::InvalidWeight { index, value });
    }
    let total: f64 = weights.iter().sum();
    let area = bounds.area();
    if (total - area).abs() > AREA_TOLERANCE * area {
        return Err(LayoutError::AreaMismatch { total, area });
    }

    let mut rects = Vec::with_capacity(weights.len());
    let mut rest = weights;
    let mut remaining = bounds;
    let mut strips = 0usize;

    while let [_, _, ..] = rest {
        let direction = Direction::for_bounds(remaining);
        let (strip, covered) = close_strip(rest, side(remaining, direction));
        trace!(items = strip, ?direction, "strip closed");
        remaining = lay_strip(&rest[..strip], covered, remaining, direction, &mut rects);
        rest = &rest[strip..];
        strips += 1;
    }
    if !rest.is_empty() {
        rects.push(remaining);
        strips += 1;
    }
    if let Some(index) = rects.iter().position(|rect| !rect.is_drawable()) {
        return Err(LayoutError::InvalidWeight {
            index,
            value: weights[index],
        });
    }

    debug!(strips, "squarified");
    Ok(rects)
}

/// [`squarify`] with the target rectangle given as loose coordinates.
///
/// # Errors
///
/// See [`squarify`].
#[inline]
pub fn compute(
    weights: &[f64],
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> Result<Vec<Rect>, LayoutError> {
    squarify(weights, Rect::new(x, y, width, height))
}

/// [`squarify`] followed by [`pad_rect`] with [`DEFAULT_PADDING`].
///
/// # Errors
///
/// See [`squarify`].
pub fn padded_squarify(weights: &[f64], bounds: Rect) -> Result<Vec<Rect>, LayoutError> {
    let mut rects = squarify(weights, bounds)?;
    for rect in &mut rects {
        *rect = pad_rect(*rect, DEFAULT_PADDING);
    }
    Ok(rects)
}

/// Inset `rect` by `padding` on both sides of each axis whose extent exceeds
/// `2 * padding`. Narrower axes are left untouched.
#[must_use]
pub fn pad_rect(mut rect: Rect, padding: f64) -> Rect {
    let twice = padding * 2.0;
    if rect.width > twice {
        rect.x += padding;
        rect.width -= twice;
    }
    if rect.height > twice {
        rect.y += padding;
        rect.height -= twice;
    }
    rect
}

/// Builder bundling normalization, layout and padding.
///
/// ```
/// use sniff_layout::{Rect, Treemap};
///
/// let rects = Treemap::new()
///     .padding(0.0)
///     .layout(&[30.0, 10.0, 10.0], Rect::new(0.0, 0.0, 10.0, 5.0))
///     .unwrap();
/// assert_eq!(rects.len(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Treemap {
    minimum_size_ratio: f64,
    padding: f64,
}

impl Default for Treemap {
    fn default() -> Self {
        Self {
            minimum_size_ratio: DEFAULT_MINIMUM_SIZE_RATIO,
            padding: DEFAULT_PADDING,
        }
    }
}

impl Treemap {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Floor for small weights, as a fraction of the largest.
    #[must_use]
    pub fn minimum_size_ratio(mut self, ratio: f64) -> Self {
        self.minimum_size_ratio = ratio;
        self
    }

    /// Per-side inset; `0.0` disables padding.
    #[must_use]
    pub fn padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Normalize raw weights to `bounds`, squarify and pad.
    ///
    /// # Errors
    ///
    /// See [`normalize_sizes`] and [`squarify`].
    pub fn layout(&self, raw_weights: &[f64], bounds: Rect) -> Result<Vec<Rect>, LayoutError> {
        let sizes = normalize_sizes(
            raw_weights,
            bounds.width,
            bounds.height,
            self.minimum_size_ratio,
        )?;
        let mut rects = squarify(&sizes, bounds)?;
        if self.padding > 0.0 {
            for rect in &mut rects {
                *rect = pad_rect(*rect, self.padding);
            }
        }
        Ok(rects)
    }
}

fn check_bounds(width: f64, height: f64) -> Result<(), LayoutError> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::DegenerateBounds { width, height })
    }
}

/// Extent the strip spans: the shorter side of the remaining rectangle.
fn side(remaining: Rect, direction: Direction) -> f64 {
    match direction {
        Direction::Horizontal => remaining.height,
        Direction::Vertical => remaining.width,
    }
}

/// Running summary of a candidate strip.
///
/// Cell aspect ratios are monotone in cell size, so the worst cell is always
/// the smallest or the largest one.
#[derive(Debug, Clone, Copy)]
struct StripStats {
    covered: f64,
    min: f64,
    max: f64,
}

impl StripStats {
    fn new(first: f64) -> Self {
        Self {
            covered: first,
            min: first,
            max: first,
        }
    }

    fn with(self, next: f64) -> Self {
        Self {
            covered: self.covered + next,
            min: self.min.min(next),
            max: self.max.max(next),
        }
    }

    fn worst_ratio(&self, side: f64) -> f64 {
        let thickness = self.covered / side;
        cell_ratio(self.min, thickness).max(cell_ratio(self.max, thickness))
    }
}

fn cell_ratio(size: f64, thickness: f64) -> f64 {
    let length = size / thickness;
    (thickness / length).max(length / thickness)
}

/// Number of leading weights in the next strip, and their combined area.
fn close_strip(weights: &[f64], side: f64) -> (usize, f64) {
    let mut stats = StripStats::new(weights[0]);
    let mut worst = stats.worst_ratio(side);
    let mut len = 1;
    while let Some(&next) = weights.get(len) {
        let grown = stats.with(next);
        let grown_worst = grown.worst_ratio(side);
        if worst < grown_worst {
            break;
        }
        stats = grown;
        worst = grown_worst;
        len += 1;
    }
    (len, stats.covered)
}

/// Emit the strip's cells and return the leftover rectangle.
fn lay_strip(
    strip: &[f64],
    covered: f64,
    remaining: Rect,
    direction: Direction,
    out: &mut Vec<Rect>,
) -> Rect {
    match direction {
        Direction::Horizontal => {
            let width = covered / remaining.height;
            let mut y = remaining.y;
            for &size in strip {
                let height = size / width;
                out.push(Rect::new(remaining.x, y, width, height));
                y += height;
            }
            Rect::new(
                remaining.x + width,
                remaining.y,
                remaining.width - width,
                remaining.height,
            )
        }
        Direction::Vertical => {
            let height = covered / remaining.width;
            let mut x = remaining.x;
            for &size in strip {
                let width = size / height;
                out.push(Rect::new(x, remaining.y, width, height));
                x += width;
            }
            Rect::new(
                remaining.x,
                remaining.y + height,
                remaining.width,
                remaining.height - height,
            )
        }
    }
}
