#![forbid(unsafe_code)]

//! Floating-point rectangles in layout space.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle with a top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Half-open containment: the right and bottom edges belong to the
    /// neighbour, so adjacent tiles never both claim a point.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Area shared with `other` (zero when they only touch).
    #[must_use]
    pub fn overlap_area(&self, other: &Self) -> f64 {
        let w = self.right().min(other.right()) - self.x.max(other.x);
        let h = self.bottom().min(other.bottom()) - self.y.max(other.y);
        if w <= 0.0 || h <= 0.0 { 0.0 } else { w * h }
    }

    /// Whether both extents are positive and finite.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Which extent of the remaining rectangle a strip consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `width >= height`: the strip hugs the left edge at full height, its
    /// cells stack top to bottom, and the remaining width shrinks.
    Horizontal,
    /// `width < height`: the strip hugs the top edge at full width, its cells
    /// run left to right, and the remaining height shrinks.
    Vertical,
}

impl Direction {
    /// Slice along the longer side; squares go horizontal.
    #[inline]
    #[must_use]
    pub fn for_bounds(bounds: Rect) -> Self {
        if bounds.width >= bounds.height {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }
}
