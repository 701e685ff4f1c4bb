// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Main implementation of the Manu Cuckoo Filter.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::data_structures::manu_cuckoo_filter::bucket::{Bucket, BUCKET_SIZE};
use crate::data_structures::manu_cuckoo_filter::hash::{
    alt_index, index_and_fingerprint, next_pow2, Fingerprint, MAX_BUCKET_POW,
};

/// Maximum number of displacements attempted by a single insertion.
pub const MAX_KICKS: usize = 500;

/// Largest number of slots a single filter can address.
pub const MAX_CAPACITY: u64 = (1u64 << MAX_BUCKET_POW) * BUCKET_SIZE as u64;

/// A fingerprint that could not be placed when an eviction chain ran out of kicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Victim {
    pub fingerprint: Fingerprint,
    pub index: usize,
    pub alt_index: usize,
}

impl Victim {
    /// Whether this victim is the fingerprint `fp` of an item hashing to `i1`/`i2`.
    fn matches(&self, fp: Fingerprint, i1: usize, i2: usize) -> bool {
        self.fingerprint == fp
            && ((self.index == i1 && self.alt_index == i2)
                || (self.index == i2 && self.alt_index == i1))
    }
}

/// A fixed-capacity cuckoo filter.
///
/// Items are reduced to one byte fingerprints stored in one of two candidate
/// buckets of four slots. When both candidates are full, resident fingerprints
/// are displaced to their own alternate bucket, up to [`MAX_KICKS`] times.
/// A chain that runs out of kicks parks the last displaced fingerprint in a
/// single victim slot so that no stored item is ever lost; the filter then
/// refuses further insertions until a deletion makes room or it is reset.
///
/// The bucket count is fixed at construction. Growth is handled by
/// [`NaluScalableFilter`](crate::data_structures::nalu_scalable_filter::NaluScalableFilter),
/// which stacks filters of increasing size.
///
/// # Type Parameters
///
/// * `R` - The randomness source used to choose eviction slots.
///
/// # Examples
///
/// ```
/// use mauka_cuckoo_lib::data_structures::manu_cuckoo_filter::ManuCuckooFilter;
///
/// let mut filter = ManuCuckooFilter::new(1_000);
/// assert!(filter.insert(b"hello"));
/// assert!(filter.lookup(b"hello"));
///
/// assert!(filter.delete(b"hello"));
/// assert!(!filter.lookup(b"hello"));
/// assert_eq!(filter.count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct ManuCuckooFilter<R = StdRng> {
    pub(super) buckets: Vec<Bucket>,
    pub(super) count: usize,
    pub(super) bucket_pow: u8,
    pub(super) victim: Option<Victim>,
    rng: R,
}

/// Bucket exponent for a requested item capacity.
fn bucket_pow_for(capacity: usize) -> u8 {
    let wanted = (capacity as u64).div_ceil(BUCKET_SIZE as u64);
    let pow = next_pow2(wanted).trailing_zeros() as u8;
    if pow > MAX_BUCKET_POW {
        warn!(
            capacity,
            max_buckets = 1u64 << MAX_BUCKET_POW,
            "Capacity hint exceeds addressable buckets, clamping"
        );
        return MAX_BUCKET_POW;
    }
    pow
}

impl ManuCuckooFilter<StdRng> {
    /// Create a filter sized for roughly `capacity` items, seeded from OS entropy.
    ///
    /// The bucket count is the next power of two at or above `capacity / 4`,
    /// and at least one.
    pub fn new(capacity: usize) -> Self {
        Self::with_rng(capacity, StdRng::from_entropy())
    }
}

impl<R> ManuCuckooFilter<R> {
    /// Create a filter sized for roughly `capacity` items using `rng` for evictions.
    pub fn with_rng(capacity: usize, rng: R) -> Self {
        let bucket_pow = bucket_pow_for(capacity);
        Self::from_parts(
            vec![Bucket::default(); 1usize << bucket_pow],
            0,
            bucket_pow,
            None,
            rng,
        )
    }

    pub(super) fn from_parts(
        buckets: Vec<Bucket>,
        count: usize,
        bucket_pow: u8,
        victim: Option<Victim>,
        rng: R,
    ) -> Self {
        Self {
            buckets,
            count,
            bucket_pow,
            victim,
            rng,
        }
    }

    /// Returns true if the filter might contain the item.
    ///
    /// False positives are possible, false negatives are not: every item whose
    /// insertion succeeded and which has not been deleted is reported, including
    /// one whose fingerprint currently sits in the victim slot.
    pub fn lookup(&self, item: &[u8]) -> bool {
        let (i1, fp) = index_and_fingerprint(item, self.bucket_pow);
        let i2 = alt_index(fp, i1, self.bucket_pow);
        self.buckets[i1].lookup(fp)
            || self.buckets[i2].lookup(fp)
            || self.victim.is_some_and(|victim| victim.matches(fp, i1, i2))
    }

    /// Number of fingerprints stored in buckets.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the filter holds no fingerprints at all.
    pub fn is_empty(&self) -> bool {
        self.count == 0 && self.victim.is_none()
    }

    /// Total number of fingerprint slots.
    pub fn capacity(&self) -> usize {
        self.buckets.len() * BUCKET_SIZE
    }

    /// Number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Fraction of slots currently occupied.
    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.capacity() as f64
    }

    /// Whether an eviction chain has failed and a victim is being held.
    ///
    /// A full filter rejects every insertion until a deletion lets the victim
    /// back into a bucket.
    pub fn is_full(&self) -> bool {
        self.victim.is_some()
    }

    /// Remove every fingerprint and the victim.
    pub fn reset(&mut self) {
        for bucket in &mut self.buckets {
            bucket.reset();
        }
        self.count = 0;
        self.victim = None;
    }

    /// Move the victim back into one of its buckets if either has room.
    fn try_place_victim(&mut self) {
        let Some(victim) = self.victim else {
            return;
        };
        if self.buckets[victim.index].insert(victim.fingerprint)
            || self.buckets[victim.alt_index].insert(victim.fingerprint)
        {
            self.count += 1;
            self.victim = None;
            debug!(
                fingerprint = victim.fingerprint,
                index = victim.index,
                "Victim placed back into the filter"
            );
        }
    }
}

impl<R: Rng> ManuCuckooFilter<R> {
    /// Insert an item.
    ///
    /// Duplicates are stored again; use [`insert_unique`](Self::insert_unique)
    /// to avoid that.
    ///
    /// # Returns
    ///
    /// `true` if the item was stored. `false` if the filter was already full,
    /// in which case nothing changes, or if the eviction chain ran out of
    /// kicks. In the latter case the item itself is stored but another
    /// fingerprint is parked as the victim and the filter is now full.
    pub fn insert(&mut self, item: &[u8]) -> bool {
        if self.victim.is_some() {
            return false;
        }

        let (i1, fp) = index_and_fingerprint(item, self.bucket_pow);
        if self.buckets[i1].insert(fp) {
            self.count += 1;
            return true;
        }
        let i2 = alt_index(fp, i1, self.bucket_pow);
        if self.buckets[i2].insert(fp) {
            self.count += 1;
            return true;
        }

        let start = if self.rng.gen::<bool>() { i1 } else { i2 };
        self.kick(fp, start)
    }

    /// Insert an item only if it is not already reported as present.
    ///
    /// # Returns
    ///
    /// `false` without touching the filter if the item looks present, otherwise
    /// the result of [`insert`](Self::insert).
    pub fn insert_unique(&mut self, item: &[u8]) -> bool {
        if self.lookup(item) {
            return false;
        }
        self.insert(item)
    }

    /// Delete one copy of an item.
    ///
    /// Deleting an item that was never inserted may remove the fingerprint of
    /// a different item that collides with it.
    pub fn delete(&mut self, item: &[u8]) -> bool {
        let (i1, fp) = index_and_fingerprint(item, self.bucket_pow);
        let i2 = alt_index(fp, i1, self.bucket_pow);

        if self.buckets[i1].delete(fp) || self.buckets[i2].delete(fp) {
            self.count -= 1;
            self.try_place_victim();
            return true;
        }

        // The victim is not part of `count`
        if self.victim.is_some_and(|victim| victim.matches(fp, i1, i2)) {
            self.victim = None;
            return true;
        }

        false
    }

    /// Displace fingerprints along the cuckoo path starting at `index`.
    fn kick(&mut self, mut fp: Fingerprint, mut index: usize) -> bool {
        for _ in 0..MAX_KICKS {
            let slot = self.rng.gen_range(0..BUCKET_SIZE);
            fp = self.buckets[index].swap_slot(slot, fp);
            index = alt_index(fp, index, self.bucket_pow);
            if self.buckets[index].insert(fp) {
                self.count += 1;
                return true;
            }
        }

        let alt = alt_index(fp, index, self.bucket_pow);
        debug!(
            fingerprint = fp,
            index,
            alt_index = alt,
            kicks = MAX_KICKS,
            count = self.count,
            "Eviction chain exhausted, holding victim"
        );
        self.victim = Some(Victim {
            fingerprint: fp,
            index,
            alt_index: alt,
        });
        false
    }
}

impl<R> PartialEq for ManuCuckooFilter<R> {
    fn eq(&self, other: &Self) -> bool {
        self.bucket_pow == other.bucket_pow
            && self.count == other.count
            && self.victim == other.victim
            && self.buckets == other.buckets
    }
}

impl<R> Eq for ManuCuckooFilter<R> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(capacity: usize) -> ManuCuckooFilter {
        ManuCuckooFilter::with_rng(capacity, StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_sizing_rounds_to_power_of_two_buckets() {
        let filter = seeded(8);
        assert_eq!(filter.bucket_count(), 2);
        assert_eq!(filter.bucket_pow, 1);

        assert_eq!(seeded(0).bucket_count(), 1);
        assert_eq!(seeded(5).bucket_count(), 2);
        assert_eq!(seeded(10_000).bucket_count(), 4096);
        assert_eq!(seeded(10_000).capacity(), 16_384);
    }

    #[test]
    fn test_insert_lookup_delete() {
        let mut filter = seeded(128);
        let item = [1u8, 2, 3, 4, 5];

        assert!(filter.insert(&item));
        assert!(filter.lookup(&item));
        assert_eq!(filter.count(), 1);

        assert!(filter.delete(&item));
        assert!(!filter.lookup(&item));
        assert_eq!(filter.count(), 0);
        assert!(!filter.delete(&item));
    }

    #[test]
    fn test_repeated_insert_saturates_both_buckets() {
        let mut filter = seeded(10_000);
        let item = b"the same item every time";
        let (i1, fp) = index_and_fingerprint(item, filter.bucket_pow);
        let expected = if alt_index(fp, i1, filter.bucket_pow) == i1 {
            BUCKET_SIZE
        } else {
            2 * BUCKET_SIZE
        };

        for _ in 0..100 {
            filter.insert(item);
        }

        assert_eq!(filter.count(), expected);
        assert!(filter.is_full());
        assert!(filter.lookup(item));
    }

    #[test]
    fn test_insert_unique_is_idempotent() {
        let mut filter = seeded(64);
        assert!(filter.insert_unique(b"only once"));
        assert!(!filter.insert_unique(b"only once"));
        assert_eq!(filter.count(), 1);
    }

    #[test]
    fn test_full_filter_keeps_every_item_reachable() {
        // A single bucket: every item shares the same candidate pair
        let mut filter = seeded(4);
        assert_eq!(filter.bucket_count(), 1);

        for item in [b"a", b"b", b"c", b"d"] {
            assert!(filter.insert(item));
        }
        assert!(!filter.is_full());

        assert!(!filter.insert(b"e"));
        assert!(filter.is_full());
        assert_eq!(filter.count(), 4);

        for item in [b"a", b"b", b"c", b"d", b"e"] {
            assert!(filter.lookup(item), "lost {:?}", item);
        }

        // Saturated filters reject without mutating
        let before = filter.clone();
        assert!(!filter.insert(b"f"));
        assert_eq!(filter, before);
    }

    #[test]
    fn test_delete_places_victim_back() {
        let mut filter = seeded(4);
        for item in [b"a", b"b", b"c", b"d", b"e"] {
            filter.insert(item);
        }
        assert!(filter.is_full());

        assert!(filter.delete(b"a"));
        assert!(!filter.is_full());
        assert_eq!(filter.count(), 4);
        for item in [b"b", b"c", b"d", b"e"] {
            assert!(filter.lookup(item));
        }

        // Room again for new items once the victim has been absorbed
        assert!(filter.delete(b"b"));
        assert!(filter.insert(b"f"));
    }

    #[test]
    fn test_delete_clears_matching_victim() {
        let mut filter = seeded(64);
        let item = b"parked";
        let (i1, fp) = index_and_fingerprint(item, filter.bucket_pow);
        let i2 = alt_index(fp, i1, filter.bucket_pow);
        filter.victim = Some(Victim {
            fingerprint: fp,
            index: i2,
            alt_index: i1,
        });

        assert!(filter.lookup(item));
        assert!(filter.delete(item));
        assert!(!filter.is_full());
        assert!(!filter.lookup(item));
        assert_eq!(filter.count(), 0);
    }

    #[test]
    fn test_deleting_everything_empties_the_filter() {
        let mut filter = seeded(10_000);
        let items: Vec<String> = (0..1_000).map(|i| format!("item-{i}")).collect();

        let stored: Vec<&String> = items
            .iter()
            .filter(|item| filter.insert_unique(item.as_bytes()))
            .collect();
        assert_eq!(filter.count(), stored.len());

        for item in &stored {
            assert!(filter.delete(item.as_bytes()));
        }
        assert_eq!(filter.count(), 0);
        assert!(filter.is_empty());
        for item in &items {
            assert!(!filter.lookup(item.as_bytes()));
        }
    }

    #[test]
    fn test_reset_clears_state() {
        let mut filter = seeded(4);
        for item in [b"a", b"b", b"c", b"d", b"e"] {
            filter.insert(item);
        }
        assert!(filter.is_full());

        filter.reset();
        assert_eq!(filter.count(), 0);
        assert!(!filter.is_full());
        for item in [b"a", b"b", b"c", b"d", b"e"] {
            assert!(!filter.lookup(item));
        }
        assert!(filter.insert(b"a"));
    }

    #[test]
    fn test_equality_ignores_rng_state() {
        let mut a = ManuCuckooFilter::with_rng(32, StdRng::seed_from_u64(1));
        let mut b = ManuCuckooFilter::with_rng(32, StdRng::seed_from_u64(2));
        a.insert(b"x");
        b.insert(b"x");
        assert_eq!(a, b);
    }
}
