// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Binary encoding of the Manu Cuckoo Filter.
//!
//! Layout, all integers little-endian:
//!
//! ```text
//! [bucket_pow: u8][count: u64]
//! [victim flag: u8][victim fingerprint: u8][victim index: u64][victim alt index: u64]
//! [4 bytes per bucket, slot order, 2^bucket_pow buckets]
//! ```
//!
//! When no victim is held the flag and the victim fields are all zero.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::trace;

use crate::data_structures::manu_cuckoo_filter::bucket::{Bucket, BUCKET_SIZE};
use crate::data_structures::manu_cuckoo_filter::error::{ManuCuckooFilterError, Result};
use crate::data_structures::manu_cuckoo_filter::filter::{ManuCuckooFilter, Victim};
use crate::data_structures::manu_cuckoo_filter::hash::{alt_index, MAX_BUCKET_POW};
use crate::data_structures::wire::WireReader;

/// Size of the fixed header preceding the bucket array.
pub const HEADER_LEN: usize = 1 + 8 + 1 + 1 + 8 + 8;

impl<R> ManuCuckooFilter<R> {
    /// Serialize the filter, including its count and victim.
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_LEN + self.buckets.len() * BUCKET_SIZE);
        bytes.push(self.bucket_pow);
        bytes.extend_from_slice(&(self.count as u64).to_le_bytes());

        match self.victim {
            Some(victim) => {
                bytes.push(1);
                bytes.push(victim.fingerprint);
                bytes.extend_from_slice(&(victim.index as u64).to_le_bytes());
                bytes.extend_from_slice(&(victim.alt_index as u64).to_le_bytes());
            }
            None => bytes.extend_from_slice(&[0u8; 18]),
        }

        for bucket in &self.buckets {
            bytes.extend_from_slice(bucket.slots());
        }
        bytes
    }
}

impl ManuCuckooFilter<StdRng> {
    /// Rebuild a filter from [`encode`](ManuCuckooFilter::encode) output.
    ///
    /// # Errors
    ///
    /// Any malformed input is rejected, nothing partial is returned.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Self::decode_with_rng(bytes, StdRng::from_entropy())
    }
}

impl<R> ManuCuckooFilter<R> {
    /// Rebuild a filter from encoded bytes using `rng` for future evictions.
    pub fn decode_with_rng(bytes: &[u8], rng: R) -> Result<Self> {
        if bytes.is_empty() {
            return Err(ManuCuckooFilterError::EmptyInput);
        }
        let mut reader = WireReader::new(bytes);

        let bucket_pow = reader.read_u8()?;
        if bucket_pow > MAX_BUCKET_POW {
            return Err(ManuCuckooFilterError::InvalidBucketPow(bucket_pow));
        }
        let count = reader.read_u64()?;
        let flag = reader.read_u8()?;
        let fingerprint = reader.read_u8()?;
        let index = reader.read_u64()?;
        let alt = reader.read_u64()?;

        let bucket_count = 1u64 << bucket_pow;
        let expected = bucket_count * BUCKET_SIZE as u64;
        let actual = reader.remaining() as u64;
        if actual != expected {
            return Err(ManuCuckooFilterError::BucketLengthMismatch { expected, actual });
        }

        let victim = decode_victim(flag, fingerprint, index, alt, bucket_pow)?;

        let buckets: Vec<Bucket> = reader
            .rest()
            .chunks_exact(BUCKET_SIZE)
            .map(|chunk| {
                let mut slots = [0u8; BUCKET_SIZE];
                slots.copy_from_slice(chunk);
                Bucket::from_slots(slots)
            })
            .collect();

        let occupied = buckets.iter().map(Bucket::occupied).sum::<usize>() as u64;
        if occupied != count {
            return Err(ManuCuckooFilterError::CountMismatch {
                encoded: count,
                occupied,
            });
        }

        trace!(
            bucket_pow,
            count,
            victim = victim.is_some(),
            "Decoded cuckoo filter"
        );
        Ok(Self::from_parts(
            buckets,
            count as usize,
            bucket_pow,
            victim,
            rng,
        ))
    }
}

fn decode_victim(
    flag: u8,
    fingerprint: u8,
    index: u64,
    alt: u64,
    bucket_pow: u8,
) -> Result<Option<Victim>> {
    match flag {
        0 if fingerprint == 0 && index == 0 && alt == 0 => Ok(None),
        0 => Err(ManuCuckooFilterError::InvalidVictim(
            "victim fields set without the presence flag".to_string(),
        )),
        1 => {
            if fingerprint == 0 {
                return Err(ManuCuckooFilterError::InvalidVictim(
                    "victim fingerprint is zero".to_string(),
                ));
            }
            let bucket_count = 1u64 << bucket_pow;
            if index >= bucket_count || alt >= bucket_count {
                return Err(ManuCuckooFilterError::InvalidVictim(format!(
                    "victim indices {index}/{alt} out of range for {bucket_count} buckets"
                )));
            }
            let (index, alt) = (index as usize, alt as usize);
            if alt_index(fingerprint, index, bucket_pow) != alt {
                return Err(ManuCuckooFilterError::InvalidVictim(format!(
                    "indices {index}/{alt} are not a candidate pair for fingerprint {fingerprint}"
                )));
            }
            Ok(Some(Victim {
                fingerprint,
                index,
                alt_index: alt,
            }))
        }
        other => Err(ManuCuckooFilterError::InvalidVictim(format!(
            "unknown presence flag {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(capacity: usize) -> ManuCuckooFilter {
        ManuCuckooFilter::with_rng(capacity, StdRng::seed_from_u64(11))
    }

    #[test]
    fn test_encode_decode_hand_filled_buckets() {
        let mut filter = seeded(8);
        assert_eq!(filter.bucket_pow, 1);
        filter.buckets = vec![
            Bucket::from_slots([1, 2, 3, 4]),
            Bucket::from_slots([5, 6, 7, 8]),
        ];
        filter.count = 8;

        let bytes = filter.encode();
        assert_eq!(bytes.len(), HEADER_LEN + 8);
        assert_eq!(bytes[0], 1);
        assert_eq!(&bytes[1..9], &8u64.to_le_bytes());
        assert_eq!(&bytes[HEADER_LEN..], &[1, 2, 3, 4, 5, 6, 7, 8]);

        let decoded = ManuCuckooFilter::decode(&bytes).expect("valid encoding");
        assert_eq!(decoded, filter);
        assert_eq!(decoded.count(), 8);
    }

    #[test]
    fn test_round_trip_preserves_victim() {
        let mut filter = seeded(4);
        for item in [b"a", b"b", b"c", b"d", b"e"] {
            filter.insert(item);
        }
        assert!(filter.is_full());

        let decoded = ManuCuckooFilter::decode(&filter.encode()).expect("valid encoding");
        assert_eq!(decoded, filter);
        assert!(decoded.is_full());
        for item in [b"a", b"b", b"c", b"d", b"e"] {
            assert!(decoded.lookup(item));
        }
    }

    #[test]
    fn test_decode_empty_input_fails() {
        assert_eq!(
            ManuCuckooFilter::decode(&[]),
            Err(ManuCuckooFilterError::EmptyInput)
        );
    }

    #[test]
    fn test_decode_truncated_header_fails() {
        let bytes = seeded(8).encode();
        let err = ManuCuckooFilter::decode(&bytes[..5]).unwrap_err();
        assert!(matches!(err, ManuCuckooFilterError::Truncated { .. }));
    }

    #[test]
    fn test_decode_rejects_short_bucket_array() {
        let bytes = seeded(8).encode();
        let err = ManuCuckooFilter::decode(&bytes[..bytes.len() - 1]).unwrap_err();
        assert_eq!(
            err,
            ManuCuckooFilterError::BucketLengthMismatch {
                expected: 8,
                actual: 7
            }
        );
    }

    #[test]
    fn test_decode_rejects_oversized_exponent() {
        let mut bytes = seeded(8).encode();
        bytes[0] = MAX_BUCKET_POW + 1;
        assert_eq!(
            ManuCuckooFilter::decode(&bytes),
            Err(ManuCuckooFilterError::InvalidBucketPow(MAX_BUCKET_POW + 1))
        );
    }

    #[test]
    fn test_decode_rejects_inconsistent_count() {
        let mut filter = seeded(8);
        filter.insert(b"x");
        let mut bytes = filter.encode();
        bytes[1] = 3;
        assert_eq!(
            ManuCuckooFilter::decode(&bytes),
            Err(ManuCuckooFilterError::CountMismatch {
                encoded: 3,
                occupied: 1
            })
        );
    }

    #[test]
    fn test_decode_rejects_bad_victim_fields() {
        let clean = seeded(64).encode();

        let mut unflagged = clean.clone();
        unflagged[10] = 9;
        assert!(matches!(
            ManuCuckooFilter::decode(&unflagged),
            Err(ManuCuckooFilterError::InvalidVictim(_))
        ));

        let mut bad_flag = clean.clone();
        bad_flag[9] = 2;
        assert!(matches!(
            ManuCuckooFilter::decode(&bad_flag),
            Err(ManuCuckooFilterError::InvalidVictim(_))
        ));

        let mut zero_fp = clean.clone();
        zero_fp[9] = 1;
        assert!(matches!(
            ManuCuckooFilter::decode(&zero_fp),
            Err(ManuCuckooFilterError::InvalidVictim(_))
        ));

        let mut out_of_range = clean;
        out_of_range[9] = 1;
        out_of_range[10] = 5;
        out_of_range[11..19].copy_from_slice(&1_000u64.to_le_bytes());
        assert!(matches!(
            ManuCuckooFilter::decode(&out_of_range),
            Err(ManuCuckooFilterError::InvalidVictim(_))
        ));
    }
}
