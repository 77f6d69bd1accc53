#![forbid(unsafe_code)]

//! Treemap view model: ranked objects laid out as labelled, coloured tiles.

use std::cmp::Ordering;

use serde::Serialize;
use sniff_layout::{LayoutError, Rect, normalize_sizes, padded_squarify, squarify};
use sniff_stats::{ObjectStats, ParsedStats};
use sniff_style::{Scale, TileStyle, TypePalette};
use tracing::{debug, instrument};

use crate::config::{SniffConfig, SortMetric};

/// File-level totals shown above the treemap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub source_size_bytes: u64,
    pub line_count: usize,
    pub total_character_count: usize,
    pub object_count: usize,
    pub shown: usize,
}

impl Summary {
    /// Decimal megabytes, two places: `"1.23 mb"`.
    #[must_use]
    pub fn size_label(&self) -> String {
        format!("{:.2} mb", self.source_size_bytes as f64 / 1000.0 / 1000.0)
    }

    #[must_use]
    pub fn header(&self) -> String {
        format!(
            "{} · {} nodes · {} characters",
            self.size_label(),
            self.object_count,
            self.total_character_count
        )
    }
}

/// One laid-out object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tile {
    pub name: String,
    pub type_tag: String,
    pub characters: usize,
    pub lines: usize,
    pub rect: Rect,
    pub label: String,
    pub tooltip: String,
    pub style: TileStyle,
}

impl Tile {
    /// Share of the whole file's characters held by this object, in percent.
    #[must_use]
    pub fn percent_of(&self, total_characters: usize) -> f64 {
        if total_characters == 0 {
            0.0
        } else {
            self.characters as f64 / total_characters as f64 * 100.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreemapView {
    pub summary: Summary,
    pub bounds: Rect,
    pub tiles: Vec<Tile>,
}

impl TreemapView {
    /// Build with the default [`TypePalette`].
    pub fn build(stats: &ParsedStats, config: &SniffConfig) -> Result<Self, LayoutError> {
        Self::build_with_palette(stats, config, &TypePalette::default())
    }

    /// Rank, truncate, lay out and label the objects in `stats`.
    ///
    /// # Errors
    ///
    /// Propagates [`LayoutError`] when the scaled viewport is degenerate or
    /// every kept object has a zero metric.
    #[instrument(skip_all, fields(objects = stats.objects.len(), sort = %config.sort), level = "debug")]
    pub fn build_with_palette(
        stats: &ParsedStats,
        config: &SniffConfig,
        palette: &TypePalette,
    ) -> Result<Self, LayoutError> {
        let scale = Scale::new(config.scale);
        let bounds = Rect::new(0.0, 0.0, scale.px(config.width), scale.px(config.height));
        let ranked = rank(stats, config.sort);
        let keep = config.max_count.max(1).min(ranked.len());
        let kept = &ranked[..keep];

        let mut summary = Summary {
            source_size_bytes: stats.source_size_bytes,
            line_count: stats.line_count,
            total_character_count: stats.total_character_count,
            object_count: stats.objects.len(),
            shown: kept.len(),
        };
        if kept.is_empty() {
            debug!("no objects to lay out");
            return Ok(Self {
                summary,
                bounds,
                tiles: Vec::new(),
            });
        }

        let weights: Vec<f64> = kept
            .iter()
            .map(|(_, obj)| metric(obj, config.sort) as f64)
            .collect();
        let sizes = normalize_sizes(
            &weights,
            bounds.width,
            bounds.height,
            config.minimum_size_ratio,
        )?;
        let rects = if config.padding {
            padded_squarify(&sizes, bounds)?
        } else {
            squarify(&sizes, bounds)?
        };

        let label_min_width = scale.px(config.label_min_width);
        let tiles: Vec<Tile> = kept
            .iter()
            .zip(rects)
            .map(|((name, obj), rect)| {
                let mut tile = Tile {
                    name: (*name).to_string(),
                    type_tag: obj.type_tag.clone(),
                    characters: obj.character_count,
                    lines: obj.line_count,
                    rect,
                    label: String::new(),
                    tooltip: format!("{name} ({})\n{}", obj.character_count, obj.type_tag),
                    style: palette.style_for(&obj.type_tag),
                };
                tile.label = if rect.width > label_min_width {
                    format!(
                        "{name}\n{:.1}% ({})",
                        tile.percent_of(stats.total_character_count),
                        obj.character_count
                    )
                } else {
                    obj.character_count.to_string()
                };
                tile
            })
            .collect();

        summary.shown = tiles.len();
        debug!(tiles = tiles.len(), "treemap view built");
        Ok(Self {
            summary,
            bounds,
            tiles,
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tile under a point, if any. Padding gutters hit nothing.
    #[must_use]
    pub fn tile_at(&self, x: f64, y: f64) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.rect.contains(x, y))
    }

    /// Tile for a node name.
    #[must_use]
    pub fn tile(&self, name: &str) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.name == name)
    }
}

fn metric(obj: &ObjectStats, sort: SortMetric) -> usize {
    match sort {
        SortMetric::Characters => obj.character_count,
        SortMetric::Lines => obj.line_count,
    }
}

/// Largest first; equal metrics fall back to name order.
fn rank(stats: &ParsedStats, sort: SortMetric) -> Vec<(&str, &ObjectStats)> {
    let mut ranked: Vec<_> = stats
        .objects
        .iter()
        .map(|(name, obj)| (name.as_str(), obj))
        .collect();
    ranked.sort_by(|(a_name, a), (b_name, b)| match metric(b, sort).cmp(&metric(a, sort)) {
        Ordering::Equal => a_name.cmp(b_name),
        other => other,
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sniff_style::Rgb;

    fn scene() -> ParsedStats {
        sniff_stats::parse_source(
            "createNode transform -n \"pCube1\";\n\
             \tsetAttr \".t\" -type \"double3\" 0 1 0 ;\n\
             createNode mesh -n \"pCubeShape1\" -p \"pCube1\";\n\
             \tsetAttr -k off \".v\";\n\
             \tsetAttr \".vir\" yes;\n\
             \tsetAttr \".vif\" yes;\n\
             createNode camera -n \"cam\";\n\
             \tsetAttr \".v\" no;\n\
             select -ne :time1;\n",
            2_500_000,
        )
        .unwrap()
    }

    #[test]
    fn tiles_are_ranked_by_characters() {
        let view = TreemapView::build(&scene(), &SniffConfig::default()).unwrap();
        let names: Vec<_> = view.tiles.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["pCubeShape1", "pCube1", "cam"]);
        assert_eq!(view.summary.object_count, 3);
        assert_eq!(view.summary.shown, 3);
    }

    #[test]
    fn sort_by_lines_with_name_tiebreak() {
        let config = SniffConfig {
            sort: SortMetric::Lines,
            ..SniffConfig::default()
        };
        let view = TreemapView::build(&scene(), &config).unwrap();
        let names: Vec<_> = view.tiles.iter().map(|t| t.name.as_str()).collect();
        // pCube1 and cam both have one line; name order breaks the tie.
        assert_eq!(names, ["pCubeShape1", "cam", "pCube1"]);
    }

    #[test]
    fn max_count_truncates() {
        let config = SniffConfig {
            max_count: 2,
            ..SniffConfig::default()
        };
        let view = TreemapView::build(&scene(), &config).unwrap();
        assert_eq!(view.tiles.len(), 2);
        assert_eq!(view.summary.shown, 2);
        assert_eq!(view.summary.object_count, 3);
        assert!(view.tile("cam").is_none());
    }

    #[test]
    fn empty_scene_gives_empty_view() {
        let stats = sniff_stats::parse_source("requires maya \"2018\";\n", 22).unwrap();
        let view = TreemapView::build(&stats, &SniffConfig::default()).unwrap();
        assert!(view.is_empty());
        assert_eq!(view.summary.shown, 0);
        assert_eq!(view.bounds, Rect::new(0.0, 0.0, 600.0, 1000.0));
    }

    #[test]
    fn labels_depend_on_tile_width() {
        let stats = scene();
        let wide = TreemapView::build(&stats, &SniffConfig::default()).unwrap();
        let shape = wide.tile("pCubeShape1").unwrap();
        assert!(shape.rect.width > 80.0);
        let pct = shape.percent_of(stats.total_character_count);
        assert_eq!(
            shape.label,
            format!("pCubeShape1\n{pct:.1}% ({})", shape.characters)
        );

        let narrow = SniffConfig {
            label_min_width: 10_000.0,
            ..SniffConfig::default()
        };
        let view = TreemapView::build(&stats, &narrow).unwrap();
        for tile in &view.tiles {
            assert_eq!(tile.label, tile.characters.to_string());
        }
    }

    #[test]
    fn tooltip_and_style_follow_type() {
        let view = TreemapView::build(&scene(), &SniffConfig::default()).unwrap();
        let cam = view.tile("cam").unwrap();
        assert_eq!(cam.tooltip, format!("cam ({})\ncamera", cam.characters));
        assert_eq!(cam.style.background, Rgb::new(0xdd, 0x6a, 0x6a));
    }

    #[test]
    fn scale_multiplies_viewport() {
        let config = SniffConfig {
            scale: 2.0,
            ..SniffConfig::default()
        };
        let view = TreemapView::build(&scene(), &config).unwrap();
        assert_eq!(view.bounds, Rect::new(0.0, 0.0, 1200.0, 2000.0));
    }

    #[test]
    fn unpadded_tiles_cover_viewport() {
        let config = SniffConfig {
            padding: false,
            ..SniffConfig::default()
        };
        let view = TreemapView::build(&scene(), &config).unwrap();
        let covered: f64 = view.tiles.iter().map(|t| t.rect.area()).sum();
        assert!((covered - 600_000.0).abs() < 1e-6);
        assert!(view.tile_at(0.0, 0.0).is_some());
        assert!(view.tile_at(599.9, 999.9).is_some());
        assert!(view.tile_at(600.0, 0.0).is_none());
    }

    #[test]
    fn padded_gutter_hits_nothing() {
        let view = TreemapView::build(&scene(), &SniffConfig::default()).unwrap();
        assert!(view.tile_at(0.5, 0.5).is_none());
        let first = &view.tiles[0];
        let (cx, cy) = (
            first.rect.x + first.rect.width / 2.0,
            first.rect.y + first.rect.height / 2.0,
        );
        assert_eq!(view.tile_at(cx, cy).map(|t| t.name.as_str()), Some(first.name.as_str()));
    }

    #[test]
    fn summary_header_uses_decimal_megabytes() {
        let view = TreemapView::build(&scene(), &SniffConfig::default()).unwrap();
        assert_eq!(view.summary.size_label(), "2.50 mb");
        assert!(view.summary.header().starts_with("2.50 mb · 3 nodes · "));
    }
}
