#![forbid(unsafe_code)]

//! Scene files on disk.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sniff_stats::{ParseError, ParsedStats};
use tracing::{debug, instrument};

/// Failure reading a scene file.
#[derive(Debug)]
pub enum SourceError {
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// A scene file's text and on-disk size.
#[derive(Debug, Clone)]
pub struct SceneSource {
    path: PathBuf,
    text: String,
    size_bytes: u64,
}

impl SceneSource {
    /// Read `path`. Invalid UTF-8 is replaced and line endings become `\n`.
    #[instrument(skip_all, fields(path = %path.as_ref().display()), level = "debug")]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref().to_path_buf();
        let (text, size_bytes) = read(&path)?;
        debug!(size_bytes, "scene loaded");
        Ok(Self {
            path,
            text,
            size_bytes,
        })
    }

    /// In-memory source; `size_bytes` is the text's UTF-8 length.
    #[must_use]
    pub fn from_text(path: impl Into<PathBuf>, text: &str) -> Self {
        Self {
            path: path.into(),
            text: normalize_newlines(text),
            size_bytes: text.len() as u64,
        }
    }

    /// Re-read the same path, replacing the held text.
    pub fn reload(&mut self) -> Result<(), SourceError> {
        let (text, size_bytes) = read(&self.path)?;
        self.text = text;
        self.size_bytes = size_bytes;
        debug!(path = %self.path.display(), size_bytes, "scene reloaded");
        Ok(())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Physical lines with their `\n` terminators.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split_inclusive('\n')
    }

    pub fn parse(&self) -> Result<ParsedStats, ParseError> {
        sniff_stats::parse(self.lines(), self.size_bytes)
    }
}

fn read(path: &Path) -> Result<(String, u64), SourceError> {
    let io_err = |source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    };
    let size_bytes = fs::metadata(path).map_err(io_err)?.len();
    let bytes = fs::read(path).map_err(io_err)?;
    let text = normalize_newlines(&String::from_utf8_lossy(&bytes));
    Ok((text, size_bytes))
}

fn normalize_newlines(text: &str) -> String {
    if text.contains('\r') {
        text.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        text.to_string()
    }
}
