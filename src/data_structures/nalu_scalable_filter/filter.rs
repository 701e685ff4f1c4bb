// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Main implementation of the Nalu Scalable Filter.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::config::Validate;
use crate::data_structures::manu_cuckoo_filter::{ManuCuckooFilter, MAX_CAPACITY};
use crate::data_structures::nalu_scalable_filter::config::NaluScalableFilterConfig;
use crate::data_structures::nalu_scalable_filter::error::Result;

/// A cuckoo filter that grows by stacking generations.
///
/// The newest generation receives every insert. Once its occupancy passes the
/// configured load factor, or an eviction chain fails in it, a larger
/// generation is appended by the next insert. Older generations stay in place and keep answering lookups and
/// deletes, so the false positive rate of the whole filter is bounded by the
/// sum of the generations' nominal rates.
///
/// # Type Parameters
///
/// * `R` - The randomness source. Each generation gets its own source seeded
///   from this one.
///
/// # Examples
///
/// ```
/// use mauka_cuckoo_lib::data_structures::nalu_scalable_filter::{
///     NaluScalableFilter, NaluScalableFilterConfig,
/// };
///
/// let config = NaluScalableFilterConfig::new()
///     .with_initial_capacity(100)
///     .with_load_factor(0.8);
/// let mut filter = NaluScalableFilter::with_config(config).unwrap();
///
/// for i in 0..1_000u32 {
///     assert!(filter.insert(&i.to_le_bytes()));
/// }
/// assert!(filter.generations() > 1);
/// assert!(filter.lookup(&42u32.to_le_bytes()));
/// ```
#[derive(Debug, Clone)]
pub struct NaluScalableFilter<R = StdRng> {
    pub(super) filters: Vec<ManuCuckooFilter<R>>,
    pub(super) config: NaluScalableFilterConfig,
    rng: R,
}

impl NaluScalableFilter<StdRng> {
    /// Create a filter with the default configuration, seeded from OS entropy.
    pub fn new() -> Self {
        Self::build(NaluScalableFilterConfig::default(), StdRng::from_entropy())
    }

    /// Create a filter with the given configuration, seeded from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn with_config(config: NaluScalableFilterConfig) -> Result<Self> {
        Self::with_config_and_rng(config, StdRng::from_entropy())
    }
}

impl Default for NaluScalableFilter<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> NaluScalableFilter<R> {
    pub(super) fn from_parts(
        filters: Vec<ManuCuckooFilter<R>>,
        config: NaluScalableFilterConfig,
        rng: R,
    ) -> Self {
        Self {
            filters,
            config,
            rng,
        }
    }

    /// Returns true if any generation might contain the item.
    pub fn lookup(&self, item: &[u8]) -> bool {
        self.filters.iter().any(|filter| filter.lookup(item))
    }

    /// Total number of fingerprints across all generations.
    pub fn count(&self) -> usize {
        self.filters.iter().map(ManuCuckooFilter::count).sum()
    }

    /// Total number of slots across all generations.
    pub fn capacity(&self) -> usize {
        self.filters.iter().map(ManuCuckooFilter::capacity).sum()
    }

    /// Number of generations.
    pub fn generations(&self) -> usize {
        self.filters.len()
    }

    /// Generations in creation order.
    pub fn filters(&self) -> &[ManuCuckooFilter<R>] {
        &self.filters
    }

    /// The configuration this filter was built with.
    pub fn config(&self) -> &NaluScalableFilterConfig {
        &self.config
    }

    fn current(&self) -> &ManuCuckooFilter<R> {
        &self.filters[self.filters.len() - 1]
    }

    fn current_mut(&mut self) -> &mut ManuCuckooFilter<R> {
        let last = self.filters.len() - 1;
        &mut self.filters[last]
    }
}

impl<R: Rng + SeedableRng> NaluScalableFilter<R> {
    /// Create a filter with the given configuration and randomness source.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn with_config_and_rng(config: NaluScalableFilterConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, rng))
    }

    fn build(config: NaluScalableFilterConfig, rng: R) -> Self {
        let mut filter = Self::from_parts(Vec::with_capacity(1), config, rng);
        filter.push_first_generation();
        filter
    }

    /// Insert an item into the newest generation, growing first if needed.
    ///
    /// # Returns
    ///
    /// `true` if the item was stored. `false` only if the newest generation is
    /// saturated and the next one would exceed [`MAX_CAPACITY`] slots.
    pub fn insert(&mut self, item: &[u8]) -> bool {
        let saturated = self.current().is_full();
        let overloaded = self.current().load_factor() > f64::from(self.config.load_factor);
        if (saturated || overloaded) && !self.grow() && saturated {
            warn!(
                generations = self.filters.len(),
                count = self.count(),
                "Newest generation is saturated and cannot grow"
            );
            return false;
        }

        // A failed chain still stores the item and parks another fingerprint
        // as the victim. The next insert sees a full generation and grows.
        if !self.current_mut().insert(item) {
            debug!(
                generation = self.filters.len() - 1,
                count = self.current().count(),
                "Newest generation saturated before its load factor"
            );
        }
        true
    }

    /// Insert an item unless some generation already reports it.
    pub fn insert_unique(&mut self, item: &[u8]) -> bool {
        if self.lookup(item) {
            return false;
        }
        self.insert(item)
    }

    /// Delete one copy of an item from the oldest generation that holds it.
    ///
    /// Generations are kept even when they become empty.
    pub fn delete(&mut self, item: &[u8]) -> bool {
        self.filters.iter_mut().any(|filter| filter.delete(item))
    }

    /// Drop every generation and start again from a fresh first generation.
    pub fn reset(&mut self) {
        self.filters.clear();
        self.push_first_generation();
    }

    fn push_first_generation(&mut self) {
        let slots = self.config.slots_for(
            self.config.initial_capacity,
            self.config.nominal_false_positive_rate(0),
        );
        let first = self.new_generation(slots);
        self.filters.push(first);
    }

    /// Append a generation sized from the newest one.
    ///
    /// Returns `false` without allocating when it would need more than
    /// [`MAX_CAPACITY`] slots.
    fn grow(&mut self) -> bool {
        let generation = self.filters.len();
        let items = self
            .config
            .next_generation_items(self.current().capacity());
        let slots = self
            .config
            .slots_for(items, self.config.nominal_false_positive_rate(generation));
        if slots as u64 > MAX_CAPACITY {
            warn!(
                generation,
                slots,
                max_slots = MAX_CAPACITY,
                "Next generation exceeds the largest addressable filter"
            );
            return false;
        }

        let filter = self.new_generation(slots);
        debug!(
            generation,
            capacity = filter.capacity(),
            previous_count = self.current().count(),
            "Appending filter generation"
        );
        self.filters.push(filter);
        true
    }

    fn new_generation(&mut self, slots: usize) -> ManuCuckooFilter<R> {
        ManuCuckooFilter::with_rng(slots, R::seed_from_u64(self.rng.gen()))
    }
}

impl<R> PartialEq for NaluScalableFilter<R> {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config && self.filters == other.filters
    }
}
