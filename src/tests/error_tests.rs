//! Tests for the error module.
//!
//! This module contains tests for error handling and error types.

use crate::data_structures::{
    ManuCuckooFilter, ManuCuckooFilterError, NaluScalableFilter, NaluScalableFilterConfig,
};
use crate::error::config::ConfigError;
use crate::error::{MaukaError, MaukaResult};

fn decode_fixed(bytes: &[u8]) -> MaukaResult<ManuCuckooFilter> {
    Ok(ManuCuckooFilter::decode(bytes)?)
}

fn decode_scalable(bytes: &[u8]) -> MaukaResult<NaluScalableFilter> {
    Ok(NaluScalableFilter::decode(bytes)?)
}

/// Test that filter errors propagate through `?`.
#[test]
fn test_filter_errors_convert() {
    assert!(matches!(
        decode_fixed(&[]),
        Err(MaukaError::Filter(ManuCuckooFilterError::EmptyInput))
    ));
    assert!(matches!(
        decode_scalable(&[1, 2, 3]),
        Err(MaukaError::ScalableFilter(_))
    ));
}

/// Test that configuration errors keep their message.
#[test]
fn test_config_error_display() {
    let err = ConfigError::out_of_range("load_factor", "must be below 1.0");
    assert_eq!(
        err.to_string(),
        "Configuration value load_factor is out of valid range: must be below 1.0"
    );

    let mauka_error = MaukaError::from(err);
    let error_string = format!("{mauka_error}");
    assert!(error_string.starts_with("Configuration error"));
    assert!(error_string.contains("load_factor"));
}

/// Test that invalid filter configuration surfaces as a scalable filter error.
#[test]
fn test_nested_config_error() {
    let config = NaluScalableFilterConfig::new().with_initial_capacity(0);
    let result: MaukaResult<NaluScalableFilter> =
        NaluScalableFilter::with_config(config).map_err(MaukaError::from);

    let error_string = result.unwrap_err().to_string();
    assert!(error_string.contains("Scalable filter error"));
    assert!(error_string.contains("initial_capacity"));
}

#[test]
fn test_custom_error() {
    let error = MaukaError::Custom("test error".to_string());
    assert_eq!(error.to_string(), "test error");
}
