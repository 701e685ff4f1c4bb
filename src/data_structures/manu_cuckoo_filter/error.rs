// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the Manu Cuckoo Filter.
//!
//! Insertion under capacity pressure is not an error: `insert` reports it as
//! `false`. These errors only arise when decoding an encoded filter.

use crate::data_structures::wire::TruncatedInput;

/// Errors that can occur when decoding a Manu Cuckoo Filter.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum ManuCuckooFilterError {
    /// The input buffer was empty
    #[error("Cannot decode a cuckoo filter from an empty buffer")]
    EmptyInput,

    /// The input ended before a complete header or bucket array was read
    #[error("Encoded cuckoo filter is truncated: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        /// Bytes the decoder required
        needed: usize,
        /// Bytes left in the buffer
        remaining: usize,
    },

    /// The bucket exponent is outside the supported range
    #[error("Invalid bucket exponent: {0}")]
    InvalidBucketPow(u8),

    /// The bucket array length disagrees with the bucket exponent
    #[error("Bucket data length mismatch: expected {expected} bytes, got {actual}")]
    BucketLengthMismatch {
        /// Bytes implied by the bucket exponent
        expected: u64,
        /// Bytes present in the buffer
        actual: u64,
    },

    /// The stored count disagrees with the number of occupied slots
    #[error("Item count mismatch: header says {encoded}, buckets hold {occupied}")]
    CountMismatch {
        /// Count read from the header
        encoded: u64,
        /// Occupied slots found in the bucket array
        occupied: u64,
    },

    /// The victim fields are inconsistent
    #[error("Invalid victim entry: {0}")]
    InvalidVictim(String),
}

impl From<TruncatedInput> for ManuCuckooFilterError {
    fn from(err: TruncatedInput) -> Self {
        Self::Truncated {
            needed: err.needed,
            remaining: err.remaining,
        }
    }
}

/// Result type for Manu Cuckoo Filter operations
pub type Result<T> = std::result::Result<T, ManuCuckooFilterError>;
