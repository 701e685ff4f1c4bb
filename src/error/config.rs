//! Configuration error module.
//!
//! This module defines error types that may occur while loading, parsing and
//! validating filter configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Error when the configuration file is missing.
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// Error when parsing or rendering the configuration.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(String),

    /// Error when validating the configuration.
    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    /// Error when a configuration value is out of the valid range.
    #[error("Configuration value {key} is out of valid range: {message}")]
    ValueOutOfRange {
        /// The key of the invalid value
        key: String,
        /// Description of the valid range
        message: String,
    },
}

impl ConfigError {
    /// Shorthand for a [`ConfigError::ValueOutOfRange`].
    pub(crate) fn out_of_range(key: &str, message: impl Into<String>) -> Self {
        Self::ValueOutOfRange {
            key: key.to_string(),
            message: message.into(),
        }
    }
}
