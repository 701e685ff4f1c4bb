//! Error module for Mauka Cuckoo.
//!
//! Each data structure defines its own error enum next to its implementation.
//! This module ties them together with the configuration errors so that
//! callers working across layers can propagate everything with `?`.

use thiserror::Error;

use crate::data_structures::manu_cuckoo_filter::ManuCuckooFilterError;
use crate::data_structures::nalu_scalable_filter::NaluScalableFilterError;

pub mod config;

/// Result type alias used throughout Mauka Cuckoo.
pub type MaukaResult<T> = Result<T, MaukaError>;

/// Core error enum for Mauka Cuckoo.
#[derive(Error, Debug)]
pub enum MaukaError {
    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Errors decoding a fixed-capacity filter.
    #[error("Cuckoo filter error: {0}")]
    Filter(#[from] ManuCuckooFilterError),

    /// Errors building or decoding a scalable filter.
    #[error("Scalable filter error: {0}")]
    ScalableFilter(#[from] NaluScalableFilterError),

    /// Custom error with message for cases where specific error types are not defined.
    #[error("{0}")]
    Custom(String),
}
