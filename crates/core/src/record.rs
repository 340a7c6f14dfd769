//! Record structure for Tessera.
//!
//! This module defines the `Record` struct which represents a single record in a table.

use crate::value::Value;
use alloc::collections::BTreeMap;
use alloc::string::String;

/// Handle for a record, unique within its table.
///
/// Handles are allocated in increasing order, so ordering by handle is insertion order.
pub type RecordId = u64;

/// Column name to value mapping.
pub type FieldMap = BTreeMap<String, Value>;

/// Builds a `FieldMap` from name/value pairs.
pub fn fields<K, V, I>(pairs: I) -> FieldMap
where
    K: Into<String>,
    V: Into<Value>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// A record in a table.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    /// Handle of this record inside its table.
    id: RecordId,
    /// Field values keyed by column name.
    fields: FieldMap,
    /// True until the first update (or removal) of this record.
    fresh: bool,
}

impl Record {
    /// Creates a new fresh record with the given handle and fields.
    pub fn new(id: RecordId, fields: FieldMap) -> Self {
        Self {
            id,
            fields,
            fresh: true,
        }
    }

    /// Returns the record handle.
    #[inline]
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Returns true if the record has not been modified since insertion.
    #[inline]
    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    /// Clears the fresh flag.
    #[inline]
    pub fn mark_stale(&mut self) {
        self.fresh = false;
    }

    /// Returns a reference to the field map.
    #[inline]
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Gets the value of a field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Merges `patch` into the field map and marks the record stale.
    ///
    /// Fields present in `patch` overwrite existing ones; new fields are added.
    pub fn apply(&mut self, patch: &FieldMap) {
        for (name, value) in patch {
            self.fields.insert(name.clone(), value.clone());
        }
        self.fresh = false;
    }

    /// Returns the number of fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if this record has no fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
