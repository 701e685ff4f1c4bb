// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Binary encoding of the Nalu Scalable Filter.
//!
//! Layout, all values little-endian:
//!
//! ```text
//! [load_factor: f32][capacity_growth_rate: f64][false_positive_rate_growth: f64]
//! [initial_capacity: u64][false_positive_rate: f64]
//! [generation count: u32]
//! generation count x [length: u64][Manu Cuckoo Filter encoding]
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::config::Validate;
use crate::data_structures::manu_cuckoo_filter::ManuCuckooFilter;
use crate::data_structures::nalu_scalable_filter::config::NaluScalableFilterConfig;
use crate::data_structures::nalu_scalable_filter::error::{NaluScalableFilterError, Result};
use crate::data_structures::nalu_scalable_filter::filter::NaluScalableFilter;
use crate::data_structures::wire::WireReader;
use crate::error::config::ConfigError;

impl<R> NaluScalableFilter<R> {
    /// Serialize the configuration followed by every generation.
    pub fn encode(&self) -> Vec<u8> {
        let config = &self.config;
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&config.load_factor.to_le_bytes());
        bytes.extend_from_slice(&config.capacity_growth_rate.to_le_bytes());
        bytes.extend_from_slice(&config.false_positive_rate_growth.to_le_bytes());
        bytes.extend_from_slice(&(config.initial_capacity as u64).to_le_bytes());
        bytes.extend_from_slice(&config.false_positive_rate.to_le_bytes());

        bytes.extend_from_slice(&(self.filters.len() as u32).to_le_bytes());
        for filter in &self.filters {
            let encoded = filter.encode();
            bytes.extend_from_slice(&(encoded.len() as u64).to_le_bytes());
            bytes.extend_from_slice(&encoded);
        }
        bytes
    }
}

impl NaluScalableFilter<StdRng> {
    /// Rebuild a filter from [`encode`](NaluScalableFilter::encode) output.
    ///
    /// # Errors
    ///
    /// Any malformed generation, invalid configuration or leftover byte is
    /// rejected, nothing partial is returned.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Self::decode_with_rng(bytes, StdRng::from_entropy())
    }
}

impl<R: Rng + SeedableRng> NaluScalableFilter<R> {
    /// Rebuild a filter from encoded bytes; `rng` seeds every generation.
    pub fn decode_with_rng(bytes: &[u8], mut rng: R) -> Result<Self> {
        let mut reader = WireReader::new(bytes);

        let load_factor = reader.read_f32()?;
        let capacity_growth_rate = reader.read_f64()?;
        let false_positive_rate_growth = reader.read_f64()?;
        let initial_capacity = usize::try_from(reader.read_u64()?).map_err(|_| {
            ConfigError::out_of_range("initial_capacity", "does not fit this platform")
        })?;
        let false_positive_rate = reader.read_f64()?;

        let config = NaluScalableFilterConfig {
            initial_capacity,
            false_positive_rate,
            load_factor,
            capacity_growth_rate,
            false_positive_rate_growth,
        };
        config.validate()?;

        let generations = reader.read_u32()? as usize;
        if generations == 0 {
            return Err(NaluScalableFilterError::NoGenerations);
        }

        let mut filters = Vec::new();
        for index in 0..generations {
            let len = reader.read_u64()?;
            let len = usize::try_from(len).map_err(|_| NaluScalableFilterError::Truncated {
                needed: usize::MAX,
                remaining: reader.remaining(),
            })?;
            let encoded = reader.take(len)?;
            let filter =
                ManuCuckooFilter::decode_with_rng(encoded, R::seed_from_u64(rng.gen()))
                    .map_err(|source| NaluScalableFilterError::Generation { index, source })?;
            filters.push(filter);
        }

        if reader.remaining() != 0 {
            return Err(NaluScalableFilterError::TrailingBytes(reader.remaining()));
        }

        trace!(generations, "Decoded scalable filter");
        Ok(Self::from_parts(filters, config, rng))
    }
}
