//! Engine configuration
//!
//! Loaded from JSON, with an embedded default matching `FakeTimeConfig::default()`.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Idle tick period must be positive")]
    ZeroIdleTick,
}

/// Tunables for the simulation engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FakeTimeConfig {
    /// Real-time period of the idle reconciler tick (ms)
    pub idle_tick_ms: u64,
    /// Whether `process_events()` drives the idle reconciler
    pub idle_reconciler: bool,
    /// Whole intervals a timer may be past due after a clock jump and still fire;
    /// beyond that a one-shot is cancelled and a repeating timer restarted
    pub overdue_grace_intervals: u32,
}

impl Default for FakeTimeConfig {
    fn default() -> Self {
        Self {
            idle_tick_ms: 10,
            idle_reconciler: true,
            overdue_grace_intervals: 1,
        }
    }
}

impl FakeTimeConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.idle_tick_ms == 0 {
            return Err(ConfigError::ZeroIdleTick);
        }
        Ok(())
    }
}

/// Load engine configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<FakeTimeConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Load configuration from a JSON string
pub fn load_config_from_str(json: &str) -> Result<FakeTimeConfig, ConfigError> {
    let config: FakeTimeConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

/// Load the default embedded configuration
pub fn load_default_config() -> Result<FakeTimeConfig, ConfigError> {
    let default_config = include_str!("fake_time_config.json");
    load_config_from_str(default_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_config() {
        let config = load_default_config().unwrap();
        assert_eq!(config, FakeTimeConfig::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = load_config_from_str(r#"{ "overdue_grace_intervals": 3 }"#).unwrap();
        assert_eq!(config.overdue_grace_intervals, 3);
        assert_eq!(config.idle_tick_ms, 10);
        assert!(config.idle_reconciler);
    }

    #[test]
    fn test_zero_idle_tick_rejected() {
        let result = load_config_from_str(r#"{ "idle_tick_ms": 0 }"#);
        assert!(matches!(result, Err(ConfigError::ZeroIdleTick)));
    }

    #[test]
    fn test_malformed_json() {
        let result = load_config_from_str("{ idle_tick_ms: ");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_config("/nonexistent/tempo/config.json");
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
