#![forbid(unsafe_code)]

//! Subscriber setup and slow-step timing.

use std::time::Duration;

use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use web_time::Instant;

/// Environment variable selecting the log output format.
pub const ENV_LOG_FORMAT: &str = "SNIFF_LOG_FORMAT";

/// Steps slower than this are reported at `warn`.
pub const SLOW_STEP: Duration = Duration::from_millis(100);

const DEFAULT_FILTER: &str = "warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// `json` (any case) selects JSON; anything else is plain text.
    #[must_use]
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Install a global stderr subscriber filtered by `RUST_LOG`.
///
/// Returns `false` if a subscriber was already installed.
pub fn init(format: LogFormat) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.is_ok()
}

/// Run `f`, logging how long it took under `name`.
pub fn timed<T>(name: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let out = f();
    let elapsed = start.elapsed();
    if elapsed > SLOW_STEP {
        warn!(step = name, "{name} took {:.2} seconds", elapsed.as_secs_f64());
    } else {
        debug!(step = name, elapsed_us = elapsed.as_micros() as u64, "step finished");
    }
    out
}
