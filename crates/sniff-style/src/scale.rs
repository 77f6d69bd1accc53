//! Display-density scale.
//!
//! Computed once by whoever owns the display and passed explicitly to code
//! that needs scaled units. Nothing here caches or reads global state.

/// Logical DPI that maps to a scale of 1.0.
pub const BASELINE_DPI: f64 = 96.0;

/// Multiplier from logical pixels to device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale(f64);

impl Default for Scale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Scale {
    pub const IDENTITY: Self = Self(1.0);

    /// Non-finite or non-positive factors collapse to [`Scale::IDENTITY`].
    #[must_use]
    pub fn new(factor: f64) -> Self {
        if factor.is_finite() && factor > 0.0 {
            Self(factor)
        } else {
            Self::IDENTITY
        }
    }

    /// Scale for a screen reporting `dpi` logical dots per inch.
    #[must_use]
    pub fn from_logical_dpi(dpi: f64) -> Self {
        Self::new(dpi / BASELINE_DPI)
    }

    #[inline]
    #[must_use]
    pub fn factor(self) -> f64 {
        self.0
    }

    /// Scale a length given in logical pixels.
    #[inline]
    #[must_use]
    pub fn px(self, value: f64) -> f64 {
        value * self.0
    }
}
