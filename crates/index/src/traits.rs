//! Index trait definitions for Tessera.
//!
//! This module defines the core `Index` trait that all index implementations must satisfy.

use tessera_core::RecordId;

/// Core trait for all index implementations.
///
/// Indexes are non-unique: any number of records may share a key.
pub trait Index<K> {
    /// Adds a key-handle pair. Adding a pair that is already present is a no-op.
    fn add(&mut self, key: K, id: RecordId);

    /// Gets the handles stored under a key, in ascending handle order.
    fn get(&self, key: &K) -> &[RecordId];

    /// Removes a key-handle pair. Returns true if it was present.
    fn remove(&mut self, key: &K, id: RecordId) -> bool;

    /// Returns the number of key-handle pairs in the index.
    fn len(&self) -> usize;

    /// Returns true if the index is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of distinct keys.
    fn key_count(&self) -> usize;
}
