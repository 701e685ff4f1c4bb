// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the Nalu Scalable Filter.

use crate::data_structures::manu_cuckoo_filter::ManuCuckooFilterError;
use crate::data_structures::wire::TruncatedInput;
use crate::error::config::ConfigError;

/// Errors that can occur when building or decoding a Nalu Scalable Filter.
#[derive(Debug, thiserror::Error, PartialEq, Clone)]
pub enum NaluScalableFilterError {
    /// The configuration was rejected
    #[error("Invalid filter configuration: {0}")]
    Config(#[from] ConfigError),

    /// The input ended early
    #[error("Encoded scalable filter is truncated: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        /// Bytes the decoder required
        needed: usize,
        /// Bytes left in the buffer
        remaining: usize,
    },

    /// The encoding declares no generations
    #[error("Encoded scalable filter has no generations")]
    NoGenerations,

    /// One generation failed to decode
    #[error("Generation {index} is invalid: {source}")]
    Generation {
        /// Position of the generation, oldest first
        index: usize,
        /// Why the generation was rejected
        #[source]
        source: ManuCuckooFilterError,
    },

    /// Bytes remained after the last generation
    #[error("{0} unexpected trailing bytes after the last generation")]
    TrailingBytes(usize),
}

impl From<TruncatedInput> for NaluScalableFilterError {
    fn from(err: TruncatedInput) -> Self {
        Self::Truncated {
            needed: err.needed,
            remaining: err.remaining,
        }
    }
}

/// Result type for Nalu Scalable Filter operations
pub type Result<T> = std::result::Result<T, NaluScalableFilterError>;
