//! Error types for counter configuration.

use thiserror::Error;

/// Reasons a [`Config`](crate::Config) is rejected.
///
/// Counter animation itself never fails: malformed targets degrade to odd
/// display text instead of an error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("threshold must be within [0, 1], got {0}")]
    ThresholdOutOfRange(f64),
    #[error("steps must be greater than zero")]
    ZeroSteps,
    #[error("interval_ms must be greater than zero")]
    ZeroInterval,
    #[error("selector `{field}` must not be empty")]
    EmptySelector { field: &'static str },
    #[error("unknown log level `{0}`")]
    InvalidLogLevel(String),
    #[error("config json error: {0}")]
    Json(#[from] serde_json::Error),
}
