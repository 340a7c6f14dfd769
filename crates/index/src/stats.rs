//! Index statistics for Tessera.
//!
//! This module provides statistics tracking for indexes.

use core::sync::atomic::{AtomicUsize, Ordering};

/// Statistics for an index.
///
/// Lookups are counted through `&self`, hence the atomics.
#[derive(Debug)]
pub struct IndexStats {
    /// Total number of key-handle pairs in the index.
    total_entries: AtomicUsize,
    /// Number of point lookups served.
    lookups: AtomicUsize,
}

impl IndexStats {
    /// Creates a new empty stats instance.
    pub fn new() -> Self {
        Self {
            total_entries: AtomicUsize::new(0),
            lookups: AtomicUsize::new(0),
        }
    }

    /// Returns the total number of entries.
    pub fn total_entries(&self) -> usize {
        self.total_entries.load(Ordering::Relaxed)
    }

    /// Returns the number of lookups served.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    /// Increments the entry count by the given amount.
    pub fn add_entries(&self, count: usize) {
        self.total_entries.fetch_add(count, Ordering::Relaxed);
    }

    /// Decrements the entry count by the given amount.
    pub fn remove_entries(&self, count: usize) {
        self.total_entries.fetch_sub(count, Ordering::Relaxed);
    }

    /// Records one lookup.
    pub fn record_lookup(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for IndexStats {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for IndexStats {
    fn clone(&self) -> Self {
        Self {
            total_entries: AtomicUsize::new(self.total_entries.load(Ordering::Relaxed)),
            lookups: AtomicUsize::new(self.lookups.load(Ordering::Relaxed)),
        }
    }
}
