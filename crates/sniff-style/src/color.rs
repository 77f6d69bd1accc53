use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// RGB color (opaque). Serializes as a `#rrggbb` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Error from [`Rgb::from_hex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError {
    pub value: String,
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid hex color: {:?} (expected #rgb or #rrggbb)", self.value)
    }
}

impl std::error::Error for ParseColorError {}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or the `#rgb` shorthand. The leading `#` is optional.
    pub fn from_hex(value: &str) -> Result<Self, ParseColorError> {
        let err = || ParseColorError {
            value: value.to_string(),
        };
        let digits = value.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return Err(err());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| err());
        match digits.len() {
            6 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                let short = |s: &str| channel(s).map(|v| v * 17);
                Ok(Self::new(
                    short(&digits[0..1])?,
                    short(&digits[1..2])?,
                    short(&digits[2..3])?,
                ))
            }
            _ => Err(err()),
        }
    }

    /// Lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Scale HSV value by `factor` percent (`150` is 50% brighter).
    ///
    /// Value that would overflow is taken out of saturation instead, so very
    /// bright colours wash towards white. A factor of zero leaves the colour
    /// unchanged; factors below 100 darken.
    #[must_use]
    pub fn lighter(self, factor: u32) -> Self {
        if factor == 0 {
            return self;
        }
        let (h, mut s, v) = self.to_hsv();
        let mut v = v * f64::from(factor) / 100.0;
        if v > 1.0 {
            s = (s - (v - 1.0)).max(0.0);
            v = 1.0;
        }
        Self::from_hsv(h, s, v)
    }

    /// Hue in degrees `[0, 360)`, saturation and value in `[0, 1]`.
    #[must_use]
    pub fn to_hsv(self) -> (f64, f64, f64) {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let h = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        let s = if max == 0.0 { 0.0 } else { delta / max };
        (h, s, max)
    }

    /// Inverse of [`Rgb::to_hsv`]; channels are rounded to nearest.
    #[must_use]
    pub fn from_hsv(h: f64, s: f64, v: f64) -> Self {
        let c = v * s;
        let hp = h.rem_euclid(360.0) / 60.0;
        let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
        let (r1, g1, b1) = match hp as u8 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = v - c;
        let to_u8 = |f: f64| ((f + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::new(to_u8(r1), to_u8(g1), to_u8(b1))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(feature = "serde")]
impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::from_hex(&value).map_err(serde::de::Error::custom)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
