//! Error taxonomy for generator construction and queries.

use thiserror::Error;

use crate::grid::GridError;

/// Invalid configuration, raised synchronously while building a generator.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration overrides must be a JSON object")]
    NotAnObject,
    #[error("invalid value {value} for '{key}': expected {expected}")]
    OutOfRange {
        key: &'static str,
        value: f64,
        expected: &'static str,
    },
    #[error("malformed threshold table '{table}': {reason}")]
    MalformedTable { table: &'static str, reason: String },
    #[error("could not decode configuration: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors surfaced by the [`WorldGenerator`](super::WorldGenerator) facade.
#[derive(Error, Debug)]
pub enum WorldGenError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Shape(#[from] GridError),
}

pub(crate) fn require_finite(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { key, value, expected: "a finite number" })
    }
}

pub(crate) fn require_positive(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { key, value, expected: "a positive number" })
    }
}

pub(crate) fn require_non_negative(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { key, value, expected: "a non-negative number" })
    }
}

pub(crate) fn require_unit_interval(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { key, value, expected: "a value in [0, 1]" })
    }
}
