use rustc_hash::FxHashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// Colour for node types the palette has no entry for.
pub const FALLBACK_COLOR: Rgb = Rgb::new(0x99, 0x99, 0x99);

/// Hover brightening, percent.
const HOVER_FACTOR: u32 = 110;
/// Focus brightening, percent.
const FOCUS_FACTOR: u32 = 150;

const ANIM_CURVE: Rgb = Rgb::new(0xD4, 0x74, 0xEC);

const DEFAULT_ENTRIES: &[(&str, Rgb)] = &[
    ("transform", Rgb::new(0x75, 0xBC, 0xE1)),
    ("nurbsCurve", Rgb::new(0xED, 0xD3, 0x77)),
    ("mesh", Rgb::new(0xC0, 0x93, 0x5E)),
    ("joint", Rgb::new(0x91, 0xDC, 0x73)),
    ("camera", Rgb::new(0xDD, 0x6A, 0x6A)),
    ("skinCluster", Rgb::new(0xE1, 0x78, 0x39)),
    ("dagPose", Rgb::new(0xE1, 0x45, 0x30)),
    ("animCurve", ANIM_CURVE),
    ("animCurveTA", ANIM_CURVE),
    ("animCurveTL", ANIM_CURVE),
    ("animCurveTT", ANIM_CURVE),
    ("animCurveTU", ANIM_CURVE),
    ("animCurveUA", ANIM_CURVE),
    ("animCurveUL", ANIM_CURVE),
    ("animCurveUT", ANIM_CURVE),
    ("animCurveUU", ANIM_CURVE),
];

/// Background colours for one tile in each interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TileStyle {
    pub background: Rgb,
    pub hover: Rgb,
    pub focus: Rgb,
}

impl TileStyle {
    #[must_use]
    pub fn from_base(background: Rgb) -> Self {
        Self {
            background,
            hover: background.lighter(HOVER_FACTOR),
            focus: background.lighter(FOCUS_FACTOR),
        }
    }
}

/// Node type → colour table.
///
/// Types are open strings; anything not registered resolves to the
/// fallback colour (default [`FALLBACK_COLOR`]).
#[derive(Debug, Clone)]
pub struct TypePalette {
    entries: FxHashMap<String, Rgb>,
    fallback: Rgb,
}

impl Default for TypePalette {
    fn default() -> Self {
        let mut palette = Self::empty();
        for (type_tag, color) in DEFAULT_ENTRIES {
            palette.insert(*type_tag, *color);
        }
        palette
    }
}

impl TypePalette {
    /// A palette with no entries; every type gets the fallback.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: FxHashMap::default(),
            fallback: FALLBACK_COLOR,
        }
    }

    /// Register or replace the colour for a node type.
    pub fn insert(&mut self, type_tag: impl Into<String>, color: Rgb) -> Option<Rgb> {
        self.entries.insert(type_tag.into(), color)
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: Rgb) -> Self {
        self.fallback = fallback;
        self
    }

    #[must_use]
    pub fn fallback(&self) -> Rgb {
        self.fallback
    }

    /// Registered colour, if any.
    #[must_use]
    pub fn get(&self, type_tag: &str) -> Option<Rgb> {
        self.entries.get(type_tag).copied()
    }

    /// Colour for `type_tag`, falling back for unknown types.
    #[must_use]
    pub fn color_for(&self, type_tag: &str) -> Rgb {
        self.get(type_tag).unwrap_or(self.fallback)
    }

    #[must_use]
    pub fn style_for(&self, type_tag: &str) -> TileStyle {
        TileStyle::from_base(self.color_for(type_tag))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
