//! Environment-driven settings.

use std::path::PathBuf;

use crate::error::StatsError;

pub const DEFAULT_STATS_FILE: &str = "data/usage_stats.json";
pub const DEFAULT_MINUTES_PER_MESSAGE: f64 = 3.0;

#[derive(Clone, Debug, PartialEq)]
pub struct StatsConfig {
    /// JSON file holding the persisted counters.
    pub path: PathBuf,
    /// Support minutes one answered message is assumed to save.
    pub minutes_per_message: f64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STATS_FILE),
            minutes_per_message: DEFAULT_MINUTES_PER_MESSAGE,
        }
    }
}

impl StatsConfig {
    /// Reads `STATS_FILE` and `STATS_MINUTES_PER_MESSAGE`.
    ///
    /// # Errors
    /// `StatsError::Config` if the minutes value is not a finite,
    /// non-negative number.
    pub fn from_env() -> Result<Self, StatsError> {
        let mut cfg = Self::default();

        if let Some(p) = non_empty("STATS_FILE") {
            cfg.path = PathBuf::from(p);
        }
        if let Some(raw) = non_empty("STATS_MINUTES_PER_MESSAGE") {
            cfg.minutes_per_message = parse_minutes(&raw)?;
        }
        Ok(cfg)
    }
}

fn non_empty(k: &str) -> Option<String> {
    std::env::var(k)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_minutes(raw: &str) -> Result<f64, StatsError> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(StatsError::Config(format!(
            "STATS_MINUTES_PER_MESSAGE must be a non-negative number, got `{raw}`"
        ))),
    }
}
