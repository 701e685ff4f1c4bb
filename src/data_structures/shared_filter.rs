// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! A lock-guarded filter that can be shared between threads.
//!
//! The filters themselves mutate buckets, counts and the victim slot without
//! any internal synchronization. `SharedFilter` puts one reader-writer lock in
//! front of a whole filter: lookups proceed in parallel, while inserts,
//! deletes and resets are serialized.

use parking_lot::RwLock;

use crate::data_structures::membership::MembershipFilter;

/// A [`MembershipFilter`] behind a single `parking_lot` reader-writer lock.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
///
/// use mauka_cuckoo_lib::data_structures::nalu_scalable_filter::NaluScalableFilter;
/// use mauka_cuckoo_lib::data_structures::shared_filter::SharedFilter;
///
/// let filter = Arc::new(SharedFilter::new(NaluScalableFilter::new()));
/// let writer = Arc::clone(&filter);
/// thread::spawn(move || writer.insert(b"from another thread"))
///     .join()
///     .unwrap();
///
/// assert!(filter.lookup(b"from another thread"));
/// ```
#[derive(Debug, Default)]
pub struct SharedFilter<F> {
    inner: RwLock<F>,
}

impl<F: MembershipFilter> SharedFilter<F> {
    /// Wrap a filter.
    pub fn new(filter: F) -> Self {
        Self {
            inner: RwLock::new(filter),
        }
    }

    /// Insert an item under the write lock.
    pub fn insert(&self, item: &[u8]) -> bool {
        self.inner.write().insert(item)
    }

    /// Check-and-insert under one write lock, so two threads inserting the
    /// same item cannot both succeed.
    pub fn insert_unique(&self, item: &[u8]) -> bool {
        self.inner.write().insert_unique(item)
    }

    /// Check an item under a read lock.
    pub fn lookup(&self, item: &[u8]) -> bool {
        self.inner.read().lookup(item)
    }

    /// Delete one copy of an item under the write lock.
    pub fn delete(&self, item: &[u8]) -> bool {
        self.inner.write().delete(item)
    }

    /// Number of stored fingerprints.
    pub fn count(&self) -> usize {
        self.inner.read().count()
    }

    /// Remove every item from the wrapped filter.
    pub fn reset(&self) {
        self.inner.write().reset()
    }

    /// Serialize a consistent snapshot of the wrapped filter.
    pub fn encode(&self) -> Vec<u8> {
        self.inner.read().encode()
    }

    /// Run `f` with shared access to the wrapped filter.
    pub fn with_filter<T>(&self, f: impl FnOnce(&F) -> T) -> T {
        f(&self.inner.read())
    }

    /// Unwrap the filter.
    pub fn into_inner(self) -> F {
        self.inner.into_inner()
    }
}
