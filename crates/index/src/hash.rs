//! Hash index implementation for Tessera.
//!
//! This module provides a hash-based index for O(1) point queries.

use crate::stats::IndexStats;
use crate::traits::Index;
use alloc::vec::Vec;
use hashbrown::HashMap;
use tessera_core::RecordId;

/// A hash-based index for O(1) point queries.
///
/// Each bucket is kept sorted by `RecordId`. Handles are allocated in insertion order,
/// so a bucket lists its records in the same order a table scan would.
#[derive(Clone, Debug)]
pub struct HashIndex<K> {
    /// The underlying map from keys to sorted record handles.
    map: HashMap<K, Vec<RecordId>>,
    /// Statistics for this index.
    stats: IndexStats,
}

impl<K: Eq + core::hash::Hash + Clone> HashIndex<K> {
    /// Creates a new hash index.
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
            stats: IndexStats::new(),
        }
    }

    /// Returns the statistics for this index.
    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    /// Iterates over every key and its bucket, in no particular key order.
    pub fn buckets(&self) -> impl Iterator<Item = (&K, &[RecordId])> {
        self.map.iter().map(|(k, ids)| (k, ids.as_slice()))
    }
}

impl<K: Eq + core::hash::Hash + Clone> Default for HashIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + core::hash::Hash + Clone> Index<K> for HashIndex<K> {
    fn add(&mut self, key: K, id: RecordId) {
        let bucket = self.map.entry(key).or_insert_with(Vec::new);
        // Fast path: new records carry the largest handle so far.
        match bucket.last() {
            Some(&last) if last < id => bucket.push(id),
            None => bucket.push(id),
            Some(_) => match bucket.binary_search(&id) {
                Ok(_) => return,
                Err(pos) => bucket.insert(pos, id),
            },
        }
        self.stats.add_entries(1);
    }

    fn get(&self, key: &K) -> &[RecordId] {
        self.stats.record_lookup();
        self.map.get(key).map(|ids| ids.as_slice()).unwrap_or(&[])
    }

    fn remove(&mut self, key: &K, id: RecordId) -> bool {
        let Some(bucket) = self.map.get_mut(key) else {
            return false;
        };
        let Ok(pos) = bucket.binary_search(&id) else {
            return false;
        };
        bucket.remove(pos);
        if bucket.is_empty() {
            self.map.remove(key);
        }
        self.stats.remove_entries(1);
        true
    }

    fn len(&self) -> usize {
        self.stats.total_entries()
    }

    fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn key_count(&self) -> usize {
        self.map.len()
    }
}
