//! Data structures for Mauka Cuckoo.
//!
//! This module contains approximate membership filters built on partial-key
//! cuckoo hashing:
//! - `manu_cuckoo_filter`: a fixed-capacity filter with a victim overflow slot
//! - `nalu_scalable_filter`: a filter that grows by stacking generations
//!
//! All implementations adhere to the strict project requirements:
//! - No unsafe code
//! - Bounded work per operation
//! - A byte-exact, validated binary encoding

pub mod manu_cuckoo_filter;
pub mod membership;
pub mod nalu_scalable_filter;
pub mod shared_filter;

pub(crate) mod wire;

// Re-export common data structures
pub use manu_cuckoo_filter::{ManuCuckooFilter, ManuCuckooFilterError};
pub use membership::MembershipFilter;
pub use nalu_scalable_filter::{
    NaluScalableFilter, NaluScalableFilterConfig, NaluScalableFilterError,
};
pub use shared_filter::SharedFilter;
