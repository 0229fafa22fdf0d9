// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Concurrent identity → descriptor store shared by a translator.
//!
//! Each key maps to a write-once cell. Creating the cell only takes the map's
//! shard lock for the duration of the insert; the descriptor itself is built
//! outside any map lock. That matters because building a task descriptor reads
//! this same cache to resolve dependencies, and `DashMap` shard locks are not
//! reentrant.
//!
//! # Guarantees
//!
//! * Exactly one `build` closure runs per key, however many threads race on
//!   the first observation. Losers wait for the winner and receive its value.
//! * [`DescriptorCache::get`] never waits. A key whose descriptor is still being
//!   built reads as absent.
//!
//! # Example
//! ```
//! use progress_forwarder::forwarding::DescriptorCache;
//!
//! let cache: DescriptorCache<u64, String> = DescriptorCache::new();
//! let first = cache.get_or_create(7, || "compileJava".to_string());
//! let again = cache.get_or_create(7, || unreachable!());
//!
//! assert!(std::sync::Arc::ptr_eq(&first, &again));
//! assert_eq!(cache.get(&8), None);
//! ```

use dashmap::DashMap;
use std::hash::Hash;
use std::sync::{Arc, OnceLock};

type Cell<V> = Arc<OnceLock<Arc<V>>>;

pub struct DescriptorCache<K, V> {
    cells: DashMap<K, Cell<V>>,
}

impl<K, V> DescriptorCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            cells: DashMap::new(),
        }
    }

    /// Returns the descriptor for `key`, building it with `build` if this is
    /// the first observation.
    pub fn get_or_create(&self, key: K, build: impl FnOnce() -> V) -> Arc<V> {
        // Clone the cell out so the shard lock is released before building.
        let cell = self.cells.entry(key).or_default().value().clone();
        cell.get_or_init(|| Arc::new(build())).clone()
    }

    /// Returns the descriptor for `key` if it has been fully built.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.cells.get(key).and_then(|cell| cell.get().cloned())
    }

    /// Number of keys observed, including any still under construction.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K, V> Default for DescriptorCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V> std::fmt::Debug for DescriptorCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescriptorCache")
            .field("entries", &self.cells.len())
            .finish()
    }
}
