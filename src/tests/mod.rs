//! Test modules for Mauka Cuckoo.
//!
//! This module contains crate-level testing infrastructure:
//! - Configuration loading and validation tests
//! - Error conversion and display tests
//! - Concurrency tests for the shared filter
//! - Shared fixtures and proptest strategies
//!
//! Unit tests for each data structure live beside the implementation.

pub mod error_tests;

// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::{create_test_dir, distinct_items, item_strategy, seeded_rng};
