// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Manu Cuckoo Filter for approximate set membership with deletion.
//!
//! A fixed-capacity cuckoo filter as described in _Cuckoo Filter: Practically
//! Better Than Bloom_ (Fan, Andersen, Kaminsky, Mitzenmacher). Each item is
//! reduced to a one byte fingerprint kept in one of two candidate buckets of
//! four slots. Unlike a Bloom filter, items can be deleted again, and for
//! false positive rates below a few percent the filter uses less space than a
//! counting Bloom filter would.
//!
//! # Features
//!
//! - Two-choice placement with bounded eviction chains (500 kicks).
//! - A single victim slot that keeps lookups sound once the filter saturates.
//! - Deterministic tests through an injectable randomness source.
//! - A bit-exact binary encoding with strict validation on decode.
//! - Zero unsafe code.
//!
//! # Example
//!
//! ```
//! use mauka_cuckoo_lib::data_structures::manu_cuckoo_filter::ManuCuckooFilter;
//!
//! let mut filter = ManuCuckooFilter::new(10_000);
//! filter.insert(b"hello");
//!
//! assert!(filter.lookup(b"hello"));
//! assert!(!filter.lookup(b"world"));
//!
//! let bytes = filter.encode();
//! let restored = ManuCuckooFilter::decode(&bytes).unwrap();
//! assert!(restored.lookup(b"hello"));
//! ```
//!
//! # Saturation
//!
//! Insertion can fail once the eviction chain runs out of kicks, usually
//! beyond 95% occupancy. The filter reports this by returning `false` and
//! refuses new items until something is deleted. Callers that need to keep
//! growing should use the
//! [`NaluScalableFilter`](crate::data_structures::nalu_scalable_filter::NaluScalableFilter).

// Module declarations
mod bucket;
mod codec;
mod error;
mod filter;
mod hash;

// Re-exports
pub use bucket::BUCKET_SIZE;
pub use codec::HEADER_LEN;
pub use error::{ManuCuckooFilterError, Result};
pub use filter::{ManuCuckooFilter, MAX_CAPACITY, MAX_KICKS};
pub use hash::Fingerprint;

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_basic_operations() {
        let mut filter = ManuCuckooFilter::new(1_000);

        assert!(filter.insert(b"hello"));
        assert!(filter.insert(b"world"));

        assert!(filter.lookup(b"hello"));
        assert!(filter.lookup(b"world"));
        assert_eq!(filter.count(), 2);
    }

    #[test]
    fn test_seeded_filters_evolve_identically() {
        let mut a = ManuCuckooFilter::with_rng(64, StdRng::seed_from_u64(99));
        let mut b = ManuCuckooFilter::with_rng(64, StdRng::seed_from_u64(99));

        for i in 0..300u32 {
            assert_eq!(a.insert(&i.to_le_bytes()), b.insert(&i.to_le_bytes()));
        }
        assert_eq!(a.encode(), b.encode());
    }
}
