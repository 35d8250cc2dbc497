//! Core configuration for portfolio-counter-core.

use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Page wiring and animation timing.
///
/// Every field has a default matching the portfolio page markup, so an empty
/// JSON object (or none at all) is a valid configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fraction of the container that must be visible before counters start.
    pub threshold: f64,
    /// Milliseconds between two ticks of one counter.
    pub interval_ms: u32,
    /// Number of increments from zero to the target magnitude.
    pub steps: u32,
    /// Selector for the container watched by the visibility trigger.
    pub container_selector: String,
    /// Selector for counter elements inside the container.
    pub counter_selector: String,
    /// Attribute holding each counter's literal target string.
    pub target_attribute: String,
    /// Finish immediately on targets whose magnitude is not a number.
    /// When false such a counter ticks forever, as the page script always did.
    pub guard_unparsable: bool,
    /// Minimum level forwarded to the console logger.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            interval_ms: 50,
            steps: 60,
            container_selector: ".bookclub-stats".to_string(),
            counter_selector: ".stat-number".to_string(),
            target_attribute: "data-target".to_string(),
            guard_unparsable: true,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parse and validate a JSON config; missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let cfg: Config = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::ThresholdOutOfRange(self.threshold));
        }
        if self.steps == 0 {
            return Err(ConfigError::ZeroSteps);
        }
        if self.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        for (field, value) in [
            ("container_selector", &self.container_selector),
            ("counter_selector", &self.counter_selector),
            ("target_attribute", &self.target_attribute),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptySelector { field });
            }
        }
        self.level_filter()?;
        Ok(())
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_markup() {
        let cfg = Config::default();
        assert_eq!(cfg.threshold, 0.3);
        assert_eq!(cfg.interval_ms, 50);
        assert_eq!(cfg.steps, 60);
        assert_eq!(cfg.container_selector, ".bookclub-stats");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = Config::from_json(r#"{ "threshold": 0.5 }"#).unwrap();
        assert_eq!(cfg.threshold, 0.5);
        assert_eq!(cfg.counter_selector, ".stat-number");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            Config::from_json(r#"{ "threshold": 1.5 }"#),
            Err(ConfigError::ThresholdOutOfRange(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{ "steps": 0 }"#),
            Err(ConfigError::ZeroSteps)
        ));
        assert!(matches!(
            Config::from_json(r#"{ "log_level": "loud" }"#),
            Err(ConfigError::InvalidLogLevel(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{ "counter_selector": " " }"#),
            Err(ConfigError::EmptySelector { field: "counter_selector" })
        ));
        assert!(matches!(
            Config::from_json("not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
