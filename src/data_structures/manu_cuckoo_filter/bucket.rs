// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Fixed-size fingerprint buckets.

use crate::data_structures::manu_cuckoo_filter::hash::Fingerprint;

/// Number of fingerprint slots in every bucket.
pub const BUCKET_SIZE: usize = 4;

/// Value of an unoccupied slot.
const EMPTY: Fingerprint = 0;

/// Four fingerprint slots, scanned linearly. Slot order carries no meaning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Bucket([Fingerprint; BUCKET_SIZE]);

impl Bucket {
    /// Build a bucket from raw slot values.
    pub fn from_slots(slots: [Fingerprint; BUCKET_SIZE]) -> Self {
        Self(slots)
    }

    /// Raw slot values in slot order.
    pub fn slots(&self) -> &[Fingerprint; BUCKET_SIZE] {
        &self.0
    }

    /// Place `fp` in the first empty slot. Returns `false` when the bucket is full.
    pub fn insert(&mut self, fp: Fingerprint) -> bool {
        match self.0.iter_mut().find(|slot| **slot == EMPTY) {
            Some(slot) => {
                *slot = fp;
                true
            }
            None => false,
        }
    }

    /// Whether any slot holds `fp`.
    pub fn lookup(&self, fp: Fingerprint) -> bool {
        self.0.contains(&fp)
    }

    /// Clear the first slot holding `fp`.
    pub fn delete(&mut self, fp: Fingerprint) -> bool {
        match self.0.iter_mut().find(|slot| **slot == fp) {
            Some(slot) => {
                *slot = EMPTY;
                true
            }
            None => false,
        }
    }

    /// Replace the fingerprint at `slot` with `fp`, returning the displaced one.
    pub fn swap_slot(&mut self, slot: usize, fp: Fingerprint) -> Fingerprint {
        std::mem::replace(&mut self.0[slot], fp)
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.0.iter().filter(|slot| **slot != EMPTY).count()
    }

    /// Empty every slot.
    pub fn reset(&mut self) {
        self.0 = [EMPTY; BUCKET_SIZE];
    }
}
