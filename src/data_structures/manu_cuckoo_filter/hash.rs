// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Fingerprint and bucket index derivation for the Manu Cuckoo Filter.
//!
//! Every item is hashed exactly once into a 64-bit word. The upper 32 bits
//! select the primary bucket and the whole word, reduced modulo 255, yields
//! the fingerprint. The alternate bucket is derived from the fingerprint alone
//! so that an evicted fingerprint can be relocated without the original item.

use std::hash::Hasher;

use fnv::FnvHasher;
use once_cell::sync::Lazy;

/// A one byte item fingerprint. Zero is reserved for empty slots.
pub type Fingerprint = u8;

/// Largest supported bucket exponent. Indices come from 32 hash bits.
pub(crate) const MAX_BUCKET_POW: u8 = 32;

/// Hash of every possible fingerprint, used to derive alternate indices.
static ALT_HASH: Lazy<[u64; 256]> = Lazy::new(|| {
    let mut table = [0u64; 256];
    for (fp, slot) in table.iter_mut().enumerate() {
        *slot = hash_item(&[fp as u8]);
    }
    table
});

/// Final avalanche step from MurmurHash3 so that both halves of the FNV
/// word depend on every input byte.
fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51_afd7_ed55_8ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    k ^= k >> 33;
    k
}

/// Hash an arbitrary byte string into a 64-bit word.
pub(crate) fn hash_item(item: &[u8]) -> u64 {
    let mut hasher = FnvHasher::default();
    hasher.write(item);
    fmix64(hasher.finish())
}

/// Mask selecting the low `bucket_pow` bits of an index.
fn mask(bucket_pow: u8) -> u64 {
    (1u64 << bucket_pow) - 1
}

/// Reduce a hash to a fingerprint in `1..=255`.
fn fingerprint_of(hash: u64) -> Fingerprint {
    (hash % 255 + 1) as Fingerprint
}

/// Derive the primary bucket index and the fingerprint for an item.
pub(crate) fn index_and_fingerprint(item: &[u8], bucket_pow: u8) -> (usize, Fingerprint) {
    let hash = hash_item(item);
    let index = (hash >> 32) & mask(bucket_pow);
    (index as usize, fingerprint_of(hash))
}

/// Derive the other candidate bucket for a fingerprint stored at `index`.
///
/// Applying this twice returns the original index, so a fingerprint can be
/// moved back and forth between its two buckets.
pub(crate) fn alt_index(fingerprint: Fingerprint, index: usize, bucket_pow: u8) -> usize {
    let mask = mask(bucket_pow);
    let hash = ALT_HASH[fingerprint as usize] & mask;
    ((index as u64 & mask) ^ hash) as usize
}

/// Smallest power of two that is at least `n`. `next_pow2(0)` is 1.
pub(crate) fn next_pow2(n: u64) -> u64 {
    n.max(1).checked_next_power_of_two().unwrap_or(1 << 63)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alt_index_is_an_involution() {
        let bucket_pow = 1024u32.trailing_zeros() as u8;
        let (i1, fp) = index_and_fingerprint(b"seif", bucket_pow);
        let i2 = alt_index(fp, i1, bucket_pow);
        let i11 = alt_index(fp, i2, bucket_pow);
        let i22 = alt_index(fp, i11, bucket_pow);

        assert_eq!(i11, i1);
        assert_eq!(i22, i2);
    }

    #[test]
    fn test_involution_holds_for_every_fingerprint() {
        for bucket_pow in [0u8, 1, 7, 16, MAX_BUCKET_POW] {
            let limit = 1u64 << bucket_pow;
            for fp in 1..=255u8 {
                for index in [0u64, limit / 2, limit - 1] {
                    let index = index as usize;
                    let alt = alt_index(fp, index, bucket_pow);
                    assert!((alt as u64) < limit);
                    assert_eq!(alt_index(fp, alt, bucket_pow), index);
                }
            }
        }
    }

    #[test]
    fn test_fingerprint_is_never_zero() {
        assert_eq!(fingerprint_of(0), 1);
        assert_eq!(fingerprint_of(254), 255);
        assert_eq!(fingerprint_of(255), 1);
        for i in 0..10_000u32 {
            let (_, fp) = index_and_fingerprint(&i.to_le_bytes(), 10);
            assert_ne!(fp, 0);
        }
    }

    #[test]
    fn test_index_is_within_bucket_range() {
        for i in 0..1_000u32 {
            let (index, _) = index_and_fingerprint(&i.to_be_bytes(), 6);
            assert!(index < 64);
        }
    }

    #[test]
    fn test_hash_stability() {
        assert_eq!(hash_item(b"stable_hash_test"), hash_item(b"stable_hash_test"));
        assert_ne!(hash_item(b"input1"), hash_item(b"input2"));
    }

    #[test]
    fn test_next_pow2() {
        assert_eq!(next_pow2(0), 1);
        assert_eq!(next_pow2(1), 1);
        assert_eq!(next_pow2(3), 4);
        assert_eq!(next_pow2(4096), 4096);
        assert_eq!(next_pow2(10_000) / 4, 4096);
    }
}
