#![forbid(unsafe_code)]

use std::fmt;
use std::io;

use sniff_layout::LayoutError;
use sniff_stats::ParseError;

use crate::config::ConfigError;
use crate::source::SourceError;

/// Anything that can stop a sniff run.
#[derive(Debug)]
pub enum SniffError {
    Source(SourceError),
    Parse(ParseError),
    Layout(LayoutError),
    Config(Vec<ConfigError>),
    /// Writing the report failed.
    Output(io::Error),
}

impl fmt::Display for SniffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source(err) => write!(f, "{err}"),
            Self::Parse(err) => write!(f, "parse error: {err}"),
            Self::Layout(err) => write!(f, "layout error: {err}"),
            Self::Config(errors) => {
                f.write_str("invalid configuration: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{err}")?;
                }
                Ok(())
            }
            Self::Output(err) => write!(f, "cannot write report: {err}"),
        }
    }
}

impl std::error::Error for SniffError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Source(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Layout(err) => Some(err),
            Self::Config(errors) => errors
                .first()
                .map(|e| e as &(dyn std::error::Error + 'static)),
            Self::Output(err) => Some(err),
        }
    }
}

impl From<SourceError> for SniffError {
    fn from(err: SourceError) -> Self {
        Self::Source(err)
    }
}

impl From<ParseError> for SniffError {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<LayoutError> for SniffError {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

impl From<Vec<ConfigError>> for SniffError {
    fn from(errors: Vec<ConfigError>) -> Self {
        Self::Config(errors)
    }
}

impl From<io::Error> for SniffError {
    fn from(err: io::Error) -> Self {
        Self::Output(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn config_errors_are_joined() {
        let err = SniffError::from(vec![
            ConfigError::new("width", "-1", "must be a positive number"),
            ConfigError::new("scale", "0", "must be a positive number"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid configuration: width=-1 (must be a positive number), \
             scale=0 (must be a positive number)"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn parse_errors_keep_their_source() {
        let err = SniffError::from(ParseError::MalformedStatement {
            line_number: 3,
            line: "createNode".into(),
        });
        assert!(err.to_string().starts_with("parse error: malformed createNode"));
        assert!(err.source().is_some());
    }
}
