#![forbid(unsafe_code)]

//! Scene Sniffer: per-node size breakdown of Maya ASCII scenes, drawn as a
//! squarified treemap.
//!
//! The pipeline is load, parse, rank, lay out, report:
//!
//! ```no_run
//! use sniff::{OutputFormat, Session, SniffConfig};
//!
//! let session = Session::open("scene.ma")?;
//! let view = session.view(&SniffConfig::default())?;
//! sniff::report::write_report(&mut std::io::stdout(), &view, "scene.ma", OutputFormat::Text)?;
//! # Ok::<(), sniff::SniffError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod source;
pub mod view;

use std::io::Write;
use std::path::Path;

pub use config::{ConfigError, SniffConfig, SortMetric};
pub use error::SniffError;
pub use report::OutputFormat;
pub use source::{SceneSource, SourceError};
pub use view::{Summary, Tile, TreemapView};

use logging::timed;
use sniff_stats::ParsedStats;

/// A loaded scene and its parsed statistics.
#[derive(Debug, Clone)]
pub struct Session {
    source: SceneSource,
    stats: ParsedStats,
}

impl Session {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SniffError> {
        let source = timed("read", || SceneSource::load(path))?;
        Self::from_source(source)
    }

    pub fn from_source(source: SceneSource) -> Result<Self, SniffError> {
        let stats = timed("parse", || source.parse())?;
        Ok(Self { source, stats })
    }

    /// Re-read and re-parse the file. On failure the previous state is kept.
    pub fn reload(&mut self) -> Result<(), SniffError> {
        let mut source = self.source.clone();
        timed("read", || source.reload())?;
        let stats = timed("parse", || source.parse())?;
        self.source = source;
        self.stats = stats;
        Ok(())
    }

    #[must_use]
    pub fn source(&self) -> &SceneSource {
        &self.source
    }

    #[must_use]
    pub fn stats(&self) -> &ParsedStats {
        &self.stats
    }

    /// Validate `config` and build the treemap view.
    pub fn view(&self, config: &SniffConfig) -> Result<TreemapView, SniffError> {
        config.validate()?;
        Ok(timed("layout", || TreemapView::build(&self.stats, config))?)
    }
}

/// Open `path`, build its view and write the report to `out`.
pub fn run<W: Write>(
    path: &Path,
    config: &SniffConfig,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), SniffError> {
    let session = Session::open(path)?;
    let view = session.view(config)?;
    let title = path.display().to_string();
    report::write_report(out, &view, &title, format)?;
    Ok(())
}
