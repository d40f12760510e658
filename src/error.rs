//! Error taxonomy for the analytics core and configuration layer.

use thiserror::Error;

/// Errors produced by the analytics core.
///
/// The core is pure computation, so the taxonomy is small: invalid
/// input is rejected synchronously and nothing is clamped to a default.
#[derive(Debug, Error)]
pub enum Error {
    /// Input rejected before any computation (negative quantities,
    /// zero-length horizon, and similar).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"tariff.rate_per_kwh"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
