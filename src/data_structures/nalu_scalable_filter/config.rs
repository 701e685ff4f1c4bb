// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Configuration for the Nalu Scalable Filter.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigResult, Validate};
use crate::data_structures::manu_cuckoo_filter::MAX_CAPACITY;
use crate::error::config::ConfigError;

/// Bits stored per fingerprint.
const FINGERPRINT_BITS: f64 = 8.0;

/// Extra bits per item needed to cover the 2 x 4 slots a lookup compares against.
const BUCKET_OVERHEAD_BITS: f64 = 3.0;

/// Upper bound on the nominal false positive rate of any generation.
const MAX_NOMINAL_RATE: f64 = 0.5;

/// Configuration for the Nalu Scalable Filter.
///
/// Every generation after the first is sized from the previous one, so these
/// values are fixed for the lifetime of the filter and travel with its
/// encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NaluScalableFilterConfig {
    /// Number of items the first generation is sized for.
    pub initial_capacity: usize,

    /// Nominal false positive rate of the first generation, in (0, 1).
    ///
    /// This only sizes generations: lower values add slots per item, so fewer
    /// generations are needed for the same number of items. Growth is still
    /// triggered by `load_factor`, and a generation filled to load factor `a`
    /// answers false positives at about `8 * a / 255` whatever rate is set
    /// here, because fingerprints are one byte wide.
    pub false_positive_rate: f64,

    /// Occupancy of the newest generation, in (0, 1), above which the next
    /// insert appends a new generation.
    pub load_factor: f32,

    /// Multiplier applied to the previous generation's slot count when a
    /// generation is appended.
    pub capacity_growth_rate: f64,

    /// Multiplier applied to the nominal false positive rate of every new
    /// generation.
    pub false_positive_rate_growth: f64,
}

impl NaluScalableFilterConfig {
    /// Creates a new configuration with default values.
    ///
    /// Default values:
    /// - initial_capacity: 10,000
    /// - false_positive_rate: 0.01 (1%)
    /// - load_factor: 0.9
    /// - capacity_growth_rate: 2.0
    /// - false_positive_rate_growth: 2.0
    pub fn new() -> Self {
        Self {
            initial_capacity: 10_000,
            false_positive_rate: 0.01,
            load_factor: 0.9,
            capacity_growth_rate: 2.0,
            false_positive_rate_growth: 2.0,
        }
    }

    /// Set the number of items the first generation is sized for.
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Set the target false positive rate of the first generation.
    pub fn with_false_positive_rate(mut self, false_positive_rate: f64) -> Self {
        self.false_positive_rate = false_positive_rate;
        self
    }

    /// Set the occupancy that triggers a new generation.
    pub fn with_load_factor(mut self, load_factor: f32) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Set the slot multiplier between generations.
    pub fn with_capacity_growth_rate(mut self, capacity_growth_rate: f64) -> Self {
        self.capacity_growth_rate = capacity_growth_rate;
        self
    }

    /// Set the false positive rate multiplier between generations.
    pub fn with_false_positive_rate_growth(mut self, false_positive_rate_growth: f64) -> Self {
        self.false_positive_rate_growth = false_positive_rate_growth;
        self
    }

    /// Nominal false positive rate of generation `generation`.
    ///
    /// The rate compounds by `false_positive_rate_growth` per generation and is
    /// capped at 0.5.
    pub fn nominal_false_positive_rate(&self, generation: usize) -> f64 {
        let exponent = i32::try_from(generation).unwrap_or(i32::MAX);
        let rate = self.false_positive_rate * self.false_positive_rate_growth.powi(exponent);
        rate.min(MAX_NOMINAL_RATE)
    }

    /// Slot count hint for a generation holding `items` at nominal `rate`.
    ///
    /// Cuckoo filters with buckets of four need about `log2(1/rate) + 3` bits
    /// per item. Fingerprints are fixed at eight bits, so a tighter rate is
    /// turned into extra slots instead. The result never drops below what the
    /// load factor requires for `items`. The result saturates at `usize::MAX`.
    pub fn slots_for(&self, items: usize, rate: f64) -> usize {
        let items = items.max(1) as f64;
        let bits_per_item = (1.0 / rate).log2() + BUCKET_OVERHEAD_BITS;
        let by_rate = items * (bits_per_item / FINGERPRINT_BITS).max(1.0);
        let by_load = items / f64::from(self.load_factor);
        by_rate.max(by_load).ceil() as usize
    }

    /// Item budget of the generation that follows one with `previous_slots` slots.
    ///
    /// Never smaller than the previous generation.
    pub fn next_generation_items(&self, previous_slots: usize) -> usize {
        let grown = previous_slots as f64 * self.capacity_growth_rate;
        grown.max(previous_slots as f64).ceil() as usize
    }
}

impl Default for NaluScalableFilterConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Validate for NaluScalableFilterConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::out_of_range(
                "initial_capacity",
                "must be greater than 0",
            ));
        }

        if !(self.false_positive_rate > 0.0 && self.false_positive_rate < 1.0) {
            return Err(ConfigError::out_of_range(
                "false_positive_rate",
                format!("must be between 0.0 and 1.0 exclusive, got {}", self.false_positive_rate),
            ));
        }

        if !(self.load_factor > 0.0 && self.load_factor < 1.0) {
            return Err(ConfigError::out_of_range(
                "load_factor",
                format!("must be between 0.0 and 1.0 exclusive, got {}", self.load_factor),
            ));
        }

        if !(self.capacity_growth_rate.is_finite() && self.capacity_growth_rate > 0.0) {
            return Err(ConfigError::out_of_range(
                "capacity_growth_rate",
                format!("must be a positive number, got {}", self.capacity_growth_rate),
            ));
        }

        if !(self.false_positive_rate_growth.is_finite() && self.false_positive_rate_growth > 0.0) {
            return Err(ConfigError::out_of_range(
                "false_positive_rate_growth",
                format!(
                    "must be a positive number, got {}",
                    self.false_positive_rate_growth
                ),
            ));
        }

        let slots = self.slots_for(self.initial_capacity, self.false_positive_rate);
        if slots as u64 > MAX_CAPACITY {
            return Err(ConfigError::out_of_range(
                "initial_capacity",
                format!(
                    "needs {slots} slots, more than the {MAX_CAPACITY} a single generation can address"
                ),
            ));
        }

        Ok(())
    }
}
