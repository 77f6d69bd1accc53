#![forbid(unsafe_code)]

//! Plain-text and JSON renderings of a [`TreemapView`].

use std::io::{self, Write};
use std::str::FromStr;

use crate::view::TreemapView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(()),
        }
    }
}

pub fn write_report<W: Write>(
    out: &mut W,
    view: &TreemapView,
    title: &str,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => write_text(out, view, title),
        OutputFormat::Json => write_json(out, view),
    }
}

/// Title, summary header, then one row per tile in rank order.
pub fn write_text<W: Write>(out: &mut W, view: &TreemapView, title: &str) -> io::Result<()> {
    let total = view.summary.total_character_count;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", view.summary.header())?;
    if view.is_empty() {
        writeln!(out, "(no nodes)")?;
        return Ok(());
    }
    writeln!(
        out,
        "{:>4}  {:>10}  {:>7}  {:>6}  {:<14}  {:<24}  rect",
        "#", "characters", "share", "lines", "type", "name"
    )?;
    for (rank, tile) in view.tiles.iter().enumerate() {
        let r = tile.rect;
        writeln!(
            out,
            "{:>4}  {:>10}  {:>6.1}%  {:>6}  {:<14}  {:<24}  {:.0},{:.0} {:.0}x{:.0}",
            rank + 1,
            tile.characters,
            tile.percent_of(total),
            tile.lines,
            tile.type_tag,
            tile.name,
            r.x,
            r.y,
            r.width,
            r.height
        )?;
    }
    if view.summary.shown < view.summary.object_count {
        writeln!(
            out,
            "showing {} of {} nodes",
            view.summary.shown, view.summary.object_count
        )?;
    }
    Ok(())
}

/// Pretty-printed JSON followed by a newline.
pub fn write_json<W: Write>(out: &mut W, view: &TreemapView) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, view)?;
    writeln!(out)
}
