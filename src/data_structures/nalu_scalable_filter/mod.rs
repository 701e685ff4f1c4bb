// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Nalu Scalable Filter: a cuckoo filter that grows online.
//!
//! A single [`ManuCuckooFilter`](crate::data_structures::manu_cuckoo_filter::ManuCuckooFilter)
//! has a fixed number of buckets and starts rejecting inserts once it
//! saturates. The Nalu Scalable Filter keeps an ordered list of them, each
//! generation larger than the last, and appends a new one whenever the newest
//! passes its load factor. Insertion cost stays amortized constant while the
//! compound false positive rate grows in a controlled way.
//!
//! # Features
//!
//! - Configurable load factor, capacity growth and false positive growth.
//! - Lookups and deletes fan out across every generation.
//! - A self-delimiting binary encoding carrying the configuration.
//! - Zero unsafe code.
//!
//! # Example
//!
//! ```
//! use mauka_cuckoo_lib::data_structures::nalu_scalable_filter::NaluScalableFilter;
//!
//! let mut filter = NaluScalableFilter::new();
//! filter.insert(b"hello");
//! assert!(filter.lookup(b"hello"));
//!
//! let restored = NaluScalableFilter::decode(&filter.encode()).unwrap();
//! assert!(restored.lookup(b"hello"));
//! assert_eq!(restored.count(), 1);
//! ```

// Module declarations
mod codec;
mod config;
mod error;
mod filter;

// Re-exports
pub use config::NaluScalableFilterConfig;
pub use error::{NaluScalableFilterError, Result};
pub use filter::NaluScalableFilter;
