//! Mauka Cuckoo Library
//!
//! Approximate set membership with deletion support, built on partial-key
//! cuckoo hashing. Two filters are provided:
//!
//! - [`ManuCuckooFilter`](data_structures::ManuCuckooFilter): a fixed-capacity
//!   filter that parks a single overflow fingerprint instead of losing it.
//! - [`NaluScalableFilter`](data_structures::NaluScalableFilter): stacks
//!   filters of increasing size to grow online.
//!
//! Both encode to a compact little-endian byte format and share the
//! [`MembershipFilter`](data_structures::MembershipFilter) trait.
//! [`SharedFilter`](data_structures::SharedFilter) puts either one behind a
//! reader-writer lock for use across threads.
//!
//! # Architecture
//!
//! - Strict component boundaries: hashing, buckets, filter logic and encoding
//!   live in separate modules
//! - Dependency injection for testability: the randomness source is a type
//!   parameter
//! - Comprehensive error handling and propagation

// Re-export public modules
pub mod config;
pub mod data_structures;
pub mod error;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{LogConfig, MaukaCuckooConfig};
use crate::data_structures::NaluScalableFilter;
use crate::error::{MaukaError, MaukaResult};

/// Version information for Mauka Cuckoo.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over the configured level when set.
///
/// # Errors
///
/// Fails if the level is not a valid filter directive or if a global
/// subscriber has already been installed.
pub fn init_logging(config: &LogConfig) -> MaukaResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| MaukaError::Custom(format!("Invalid log level directive: {e}")))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(config.source_location)
        .with_line_number(config.source_location)
        .with_thread_names(true);

    let result = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.map_err(|e| MaukaError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

/// Build the scalable filter described by a loaded configuration.
///
/// # Errors
///
/// Returns an error if the filter section fails validation.
pub fn filter_from_config(config: &MaukaCuckooConfig) -> MaukaResult<NaluScalableFilter> {
    let filter = NaluScalableFilter::with_config(config.filter.clone())?;
    info!(
        initial_capacity = config.filter.initial_capacity,
        false_positive_rate = config.filter.false_positive_rate,
        slots = filter.capacity(),
        "Scalable filter initialized"
    );
    Ok(filter)
}
