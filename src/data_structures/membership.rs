// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! The operations shared by every approximate membership filter in this crate.

use rand::{Rng, SeedableRng};

use crate::data_structures::manu_cuckoo_filter::ManuCuckooFilter;
use crate::data_structures::nalu_scalable_filter::NaluScalableFilter;

/// An approximate set of byte strings supporting deletion.
///
/// Both the fixed-capacity and the scalable filter implement this trait, so
/// callers can start with one and switch to the other without other changes.
pub trait MembershipFilter {
    /// Insert an item, returning `false` if the filter could not store it.
    fn insert(&mut self, item: &[u8]) -> bool;

    /// Insert an item unless it is already reported as present.
    fn insert_unique(&mut self, item: &[u8]) -> bool;

    /// Whether the item might be present. Never false for a live item.
    fn lookup(&self, item: &[u8]) -> bool;

    /// Delete one copy of an item.
    fn delete(&mut self, item: &[u8]) -> bool;

    /// Number of stored fingerprints.
    fn count(&self) -> usize;

    /// Remove every item.
    fn reset(&mut self);

    /// Serialize the filter.
    fn encode(&self) -> Vec<u8>;
}

impl<R: Rng> MembershipFilter for ManuCuckooFilter<R> {
    fn insert(&mut self, item: &[u8]) -> bool {
        ManuCuckooFilter::insert(self, item)
    }

    fn insert_unique(&mut self, item: &[u8]) -> bool {
        ManuCuckooFilter::insert_unique(self, item)
    }

    fn lookup(&self, item: &[u8]) -> bool {
        ManuCuckooFilter::lookup(self, item)
    }

    fn delete(&mut self, item: &[u8]) -> bool {
        ManuCuckooFilter::delete(self, item)
    }

    fn count(&self) -> usize {
        ManuCuckooFilter::count(self)
    }

    fn reset(&mut self) {
        ManuCuckooFilter::reset(self)
    }

    fn encode(&self) -> Vec<u8> {
        ManuCuckooFilter::encode(self)
    }
}

impl<R: Rng + SeedableRng> MembershipFilter for NaluScalableFilter<R> {
    fn insert(&mut self, item: &[u8]) -> bool {
        NaluScalableFilter::insert(self, item)
    }

    fn insert_unique(&mut self, item: &[u8]) -> bool {
        NaluScalableFilter::insert_unique(self, item)
    }

    fn lookup(&self, item: &[u8]) -> bool {
        NaluScalableFilter::lookup(self, item)
    }

    fn delete(&mut self, item: &[u8]) -> bool {
        NaluScalableFilter::delete(self, item)
    }

    fn count(&self) -> usize {
        NaluScalableFilter::count(self)
    }

    fn reset(&mut self) {
        NaluScalableFilter::reset(self)
    }

    fn encode(&self) -> Vec<u8> {
        NaluScalableFilter::encode(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    fn exercise<F: MembershipFilter>(filter: &mut F) {
        assert!(filter.insert(b"alpha"));
        assert!(filter.insert_unique(b"beta"));
        assert!(!filter.insert_unique(b"beta"));
        assert!(filter.lookup(b"alpha"));
        assert_eq!(filter.count(), 2);

        assert!(filter.delete(b"alpha"));
        assert_eq!(filter.count(), 1);

        filter.reset();
        assert_eq!(filter.count(), 0);
        assert!(!filter.lookup(b"beta"));
        assert!(!filter.encode().is_empty());
    }

    #[test]
    fn test_both_filters_behave_alike() {
        exercise(&mut ManuCuckooFilter::with_rng(1_000, StdRng::seed_from_u64(1)));
        exercise(&mut NaluScalableFilter::new());
    }
}
