#![forbid(unsafe_code)]

//! Viewer configuration with `SNIFF_*` environment overrides.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sniff_layout::DEFAULT_MINIMUM_SIZE_RATIO;

pub const ENV_MAX_COUNT: &str = "SNIFF_MAX_COUNT";
pub const ENV_WIDTH: &str = "SNIFF_WIDTH";
pub const ENV_HEIGHT: &str = "SNIFF_HEIGHT";
pub const ENV_SCALE: &str = "SNIFF_SCALE";
pub const ENV_MIN_SIZE_RATIO: &str = "SNIFF_MIN_SIZE_RATIO";
pub const ENV_PADDING: &str = "SNIFF_PADDING";
pub const ENV_LABEL_MIN_WIDTH: &str = "SNIFF_LABEL_MIN_WIDTH";
pub const ENV_SORT: &str = "SNIFF_SORT";

/// Upper bound on how many tiles a view may hold.
pub const MAX_COUNT_LIMIT: usize = 10_000;

/// Which per-object metric drives ordering and tile area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMetric {
    #[default]
    Characters,
    Lines,
}

impl SortMetric {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Characters => "characters",
            Self::Lines => "lines",
        }
    }
}

impl fmt::Display for SortMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMetric {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "characters" | "chars" => Ok(Self::Characters),
            "lines" => Ok(Self::Lines),
            _ => Err(()),
        }
    }
}

/// Settings for building a treemap view.
///
/// `width`, `height` and `label_min_width` are logical units; the view
/// multiplies them by `scale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SniffConfig {
    pub max_count: usize,
    pub width: f64,
    pub height: f64,
    pub scale: f64,
    pub minimum_size_ratio: f64,
    pub padding: bool,
    pub label_min_width: f64,
    pub sort: SortMetric,
}

impl Default for SniffConfig {
    fn default() -> Self {
        Self {
            max_count: 100,
            width: 600.0,
            height: 1000.0,
            scale: 1.0,
            minimum_size_ratio: DEFAULT_MINIMUM_SIZE_RATIO,
            padding: true,
            label_min_width: 80.0,
            sort: SortMetric::Characters,
        }
    }
}

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl ConfigError {
    pub(crate) fn new(
        field: &'static str,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl SniffConfig {
    /// Validate config constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        if !(1..=MAX_COUNT_LIMIT).contains(&self.max_count) {
            errors.push(ConfigError::new(
                "max_count",
                self.max_count.to_string(),
                format!("expected 1..={MAX_COUNT_LIMIT}"),
            ));
        }
        validate_positive("width", self.width, &mut errors);
        validate_positive("height", self.height, &mut errors);
        validate_positive("scale", self.scale, &mut errors);
        if !(self.minimum_size_ratio.is_finite() && (0.0..=1.0).contains(&self.minimum_size_ratio))
        {
            errors.push(ConfigError::new(
                "minimum_size_ratio",
                self.minimum_size_ratio.to_string(),
                "expected a ratio in 0..=1",
            ));
        }
        if !(self.label_min_width.is_finite() && self.label_min_width >= 0.0) {
            errors.push(ConfigError::new(
                "label_min_width",
                self.label_min_width.to_string(),
                "expected a non-negative width",
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Viewport size after scaling.
    #[must_use]
    pub fn scaled_size(&self) -> (f64, f64) {
        (self.width * self.scale, self.height * self.scale)
    }
}

/// Overlay `SNIFF_*` values onto `config` without validating the result.
/// Unparsable values are skipped and reported.
pub(crate) fn apply_env<F>(config: &mut SniffConfig, mut get: F) -> Vec<ConfigError>
where
    F: FnMut(&str) -> Option<String>,
{
    let mut errors = Vec::new();

    if let Some(value) = get(ENV_MAX_COUNT) {
        match value.trim().parse() {
            Ok(n) => config.max_count = n,
            Err(_) => errors.push(ConfigError::new("max_count", value, "expected integer")),
        }
    }
    if let Some(value) = get(ENV_WIDTH) {
        match parse_f64(&value) {
            Some(n) => config.width = n,
            None => errors.push(ConfigError::new("width", value, "expected number")),
        }
    }
    if let Some(value) = get(ENV_HEIGHT) {
        match parse_f64(&value) {
            Some(n) => config.height = n,
            None => errors.push(ConfigError::new("height", value, "expected number")),
        }
    }
    if let Some(value) = get(ENV_SCALE) {
        match parse_f64(&value) {
            Some(n) => config.scale = n,
            None => errors.push(ConfigError::new("scale", value, "expected number")),
        }
    }
    if let Some(value) = get(ENV_MIN_SIZE_RATIO) {
        match parse_f64(&value) {
            Some(n) => config.minimum_size_ratio = n,
            None => errors.push(ConfigError::new(
                "minimum_size_ratio",
                value,
                "expected number",
            )),
        }
    }
    if let Some(value) = get(ENV_PADDING) {
        match parse_bool(&value) {
            Some(b) => config.padding = b,
            None => errors.push(ConfigError::new(
                "padding",
                value,
                "expected bool (1/0/true/false)",
            )),
        }
    }
    if let Some(value) = get(ENV_LABEL_MIN_WIDTH) {
        match parse_f64(&value) {
            Some(n) => config.label_min_width = n,
            None => errors.push(ConfigError::new("label_min_width", value, "expected number")),
        }
    }
    if let Some(value) = get(ENV_SORT) {
        match value.parse() {
            Ok(metric) => config.sort = metric,
            Err(()) => errors.push(ConfigError::new(
                "sort",
                value,
                "expected characters or lines",
            )),
        }
    }

    errors
}

fn validate_positive(field: &'static str, value: f64, errors: &mut Vec<ConfigError>) {
    if !(value.is_finite() && value > 0.0) {
        errors.push(ConfigError::new(
            field,
            value.to_string(),
            "must be a positive number",
        ));
    }
}

pub(crate) fn parse_f64(value: &str) -> Option<f64> {
    value.trim().parse().ok()
}

pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse_env(pairs: &[(&'static str, &'static str)]) -> (SniffConfig, Vec<ConfigError>) {
        let env: HashMap<_, _> = pairs.iter().copied().collect();
        let mut config = SniffConfig::default();
        let errors = apply_env(&mut config, |key| env.get(key).map(|value| value.to_string()));
        (config, errors)
    }

    #[test]
    fn defaults_are_valid() {
        let config = SniffConfig::default();
        assert_eq!(config.max_count, 100);
        assert_eq!(config.scaled_size(), (600.0, 1000.0));
        assert_eq!(config.sort, SortMetric::Characters);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn env_overrides_apply() {
        let (config, errors) = parse_env(&[
            (ENV_MAX_COUNT, "25"),
            (ENV_WIDTH, "800"),
            (ENV_SCALE, "2"),
            (ENV_PADDING, "off"),
            (ENV_SORT, "Lines"),
        ]);
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(config.max_count, 25);
        assert!(!config.padding);
        assert_eq!(config.sort, SortMetric::Lines);
        assert_eq!(config.scaled_size(), (1600.0, 2000.0));
    }

    #[test]
    fn unparsable_values_keep_defaults_and_report() {
        let (config, errors) = parse_env(&[(ENV_MAX_COUNT, "lots"), (ENV_SORT, "bytes")]);
        assert_eq!(config.max_count, 100);
        assert_eq!(config.sort, SortMetric::Characters);
        assert!(errors.iter().any(|e| e.field == "max_count"));
        assert!(errors.iter().any(|e| e.field == "sort"));
    }

    #[test]
    fn validation_collects_every_violation() {
        let config = SniffConfig {
            max_count: 0,
            width: -1.0,
            scale: f64::NAN,
            minimum_size_ratio: 2.0,
            ..SniffConfig::default()
        };
        let errors = config.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, ["max_count", "width", "scale", "minimum_size_ratio"]);
    }

    #[test]
    fn out_of_range_env_value_fails_validation() {
        let (config, errors) = parse_env(&[(ENV_MAX_COUNT, "20000")]);
        assert!(errors.is_empty(), "{errors:?}");
        let violations = config.validate().unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].to_string(),
            "max_count=20000 (expected 1..=10000)"
        );
    }
}
