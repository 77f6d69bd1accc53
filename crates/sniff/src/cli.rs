#![forbid(unsafe_code)]

//! Command-line argument parsing for the `sniff` binary.
//!
//! Parses args by hand. `SNIFF_*` environment variables supply defaults
//! that explicit flags override.

use std::env;
use std::path::PathBuf;
use std::process;

use crate::config::{self, ConfigError, SniffConfig, SortMetric};
use crate::logging::{ENV_LOG_FORMAT, LogFormat};
use crate::report::OutputFormat;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
Scene Sniffer: which nodes make a Maya ASCII scene heavy

USAGE:
    sniff <FILE> [OPTIONS]

OPTIONS:
    --maxcount N, --maxcount=N  Show at most N nodes, 1..=10000 (default: 100)
    --width=W                   Treemap width in logical units (default: 600)
    --height=H                  Treemap height in logical units (default: 1000)
    --scale=S                   Display scale factor (default: 1.0)
    --sort=METRIC               Rank by 'characters' or 'lines' (default: characters)
    --min-size-ratio=R          Smallest tile as a fraction of the largest (default: 0.01)
    --label-min-width=W         Narrower tiles show only their count (default: 80)
    --no-padding                Pack tiles edge to edge
    --format=FORMAT             Output 'text' or 'json' (default: text)
    --log-json                  Emit logs as JSON on stderr
    --help, -h                  Show this help message
    --version, -V               Show version

ENVIRONMENT VARIABLES:
    SNIFF_MAX_COUNT        Override default --maxcount
    SNIFF_WIDTH            Override default --width
    SNIFF_HEIGHT           Override default --height
    SNIFF_SCALE            Override default --scale
    SNIFF_SORT             Override default --sort
    SNIFF_MIN_SIZE_RATIO   Override default --min-size-ratio
    SNIFF_LABEL_MIN_WIDTH  Override default --label-min-width
    SNIFF_PADDING          Tile padding on/off (1/0/true/false)
    SNIFF_LOG_FORMAT       'json' for JSON logs
    RUST_LOG               Log filter (default: warn)";

/// Parsed command-line options.
#[derive(Debug, Clone)]
pub struct Opts {
    /// Scene file to inspect.
    pub file: PathBuf,
    pub config: SniffConfig,
    pub format: OutputFormat,
    pub log_format: LogFormat,
    /// Environment values that could not be used; reported once logging is up.
    pub env_warnings: Vec<ConfigError>,
}

#[derive(Debug, Clone, PartialEq)]
enum ParseError {
    Help,
    Version,
    MissingFile,
    InvalidValue { flag: &'static str, value: String },
    InvalidConfig(Vec<ConfigError>),
    UnknownArg(String),
}

impl Opts {
    /// Parse command-line arguments and environment variables, exiting on
    /// `--help`, `--version` or bad input.
    pub fn parse() -> Self {
        match Self::parse_from_env_and_args(env::args().skip(1), |key| env::var(key).ok()) {
            Ok(opts) => opts,
            Err(ParseError::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Err(ParseError::Version) => {
                println!("sniff {VERSION}");
                process::exit(0);
            }
            Err(ParseError::MissingFile) => {
                eprintln!("Missing scene file argument.");
                eprintln!("Run with --help for usage information.");
                process::exit(2);
            }
            Err(ParseError::InvalidValue { flag, value }) => {
                eprintln!("Invalid {flag} value: {value}");
                process::exit(2);
            }
            Err(ParseError::InvalidConfig(errors)) => {
                for err in errors {
                    eprintln!("Invalid configuration: {err}");
                }
                process::exit(2);
            }
            Err(ParseError::UnknownArg(arg)) => {
                eprintln!("Unknown argument: {arg}");
                eprintln!("Run with --help for usage information.");
                process::exit(2);
            }
        }
    }

    fn parse_from_env_and_args<I, S, F>(args: I, mut get_env: F) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: FnMut(&str) -> Option<String>,
    {
        let mut cfg = SniffConfig::default();
        let env_warnings = config::apply_env(&mut cfg, &mut get_env);
        let mut log_format = LogFormat::from_env_value(get_env(ENV_LOG_FORMAT).as_deref());
        let mut format = OutputFormat::default();
        let mut file: Option<PathBuf> = None;

        // Parse command-line args (override env vars)
        let args: Vec<String> = args
            .into_iter()
            .map(|arg| arg.as_ref().to_string())
            .collect();
        let mut i = 0;
        while i < args.len() {
            let arg = &args[i];
            match arg.as_str() {
                "--help" | "-h" => {
                    return Err(ParseError::Help);
                }
                "--version" | "-V" => {
                    return Err(ParseError::Version);
                }
                "--no-padding" => {
                    cfg.padding = false;
                }
                "--log-json" => {
                    log_format = LogFormat::Json;
                }
                "--maxcount" => {
                    i += 1;
                    let val = args.get(i).map(String::as_str).unwrap_or_default();
                    cfg.max_count = parse_value("--maxcount", val)?;
                }
                other => {
                    if let Some(val) = other.strip_prefix("--maxcount=") {
                        cfg.max_count = parse_value("--maxcount", val)?;
                    } else if let Some(val) = other.strip_prefix("--width=") {
                        cfg.width = parse_value("--width", val)?;
                    } else if let Some(val) = other.strip_prefix("--height=") {
                        cfg.height = parse_value("--height", val)?;
                    } else if let Some(val) = other.strip_prefix("--scale=") {
                        cfg.scale = parse_value("--scale", val)?;
                    } else if let Some(val) = other.strip_prefix("--min-size-ratio=") {
                        cfg.minimum_size_ratio = parse_value("--min-size-ratio", val)?;
                    } else if let Some(val) = other.strip_prefix("--label-min-width=") {
                        cfg.label_min_width = parse_value("--label-min-width", val)?;
                    } else if let Some(val) = other.strip_prefix("--sort=") {
                        cfg.sort = val.parse::<SortMetric>().map_err(|()| ParseError::InvalidValue {
                            flag: "--sort",
                            value: val.to_string(),
                        })?;
                    } else if let Some(val) = other.strip_prefix("--format=") {
                        format = val.parse::<OutputFormat>().map_err(|()| {
                            ParseError::InvalidValue {
                                flag: "--format",
                                value: val.to_string(),
                            }
                        })?;
                    } else if other.starts_with('-') || file.is_some() {
                        return Err(ParseError::UnknownArg(other.to_string()));
                    } else {
                        file = Some(PathBuf::from(other));
                    }
                }
            }
            i += 1;
        }

        let file = file.ok_or(ParseError::MissingFile)?;
        cfg.validate().map_err(ParseError::InvalidConfig)?;
        Ok(Self {
            file,
            config: cfg,
            format,
            log_format,
            env_warnings,
        })
    }
}

fn parse_value<T: std::str::FromStr>(flag: &'static str, val: &str) -> Result<T, ParseError> {
    val.trim().parse().map_err(|_| ParseError::InvalidValue {
        flag,
        value: val.to_string(),
    })
}
