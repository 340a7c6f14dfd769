//! Per-field secondary index.
//!
//! A `FieldIndex` maps each value of one record field to the handles of the records
//! currently holding it. Records without the field are not indexed.

use crate::hash::HashIndex;
use crate::stats::IndexStats;
use crate::traits::Index;
use alloc::string::String;
use tessera_core::{FieldMap, RecordId, Value};

/// A secondary index over a single field.
#[derive(Clone, Debug)]
pub struct FieldIndex {
    field: String,
    inner: HashIndex<Value>,
}

impl FieldIndex {
    /// Creates an empty index for `field`.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            inner: HashIndex::new(),
        }
    }

    /// Builds an index for `field` from existing records in one pass.
    pub fn build<'a, I>(field: impl Into<String>, records: I) -> Self
    where
        I: IntoIterator<Item = (RecordId, &'a FieldMap)>,
    {
        let mut index = Self::new(field);
        for (id, fields) in records {
            index.insert(id, fields);
        }
        index
    }

    /// Returns the indexed field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Files a record under its value for the indexed field.
    pub fn insert(&mut self, id: RecordId, fields: &FieldMap) {
        if let Some(value) = fields.get(&self.field) {
            self.inner.add(value.clone(), id);
        }
    }

    /// Removes a record from the bucket for its value of the indexed field.
    ///
    /// `fields` must be the record's fields as they were when it was last filed.
    pub fn remove(&mut self, id: RecordId, fields: &FieldMap) -> bool {
        match fields.get(&self.field) {
            Some(value) => self.inner.remove(value, id),
            None => false,
        }
    }

    /// Moves a record from the bucket for `old` to the bucket for `new`.
    ///
    /// `None` means the record has no value for the indexed field.
    pub fn refile(&mut self, id: RecordId, old: Option<&Value>, new: Option<&Value>) {
        if old == new {
            return;
        }
        if let Some(value) = old {
            self.inner.remove(value, id);
        }
        if let Some(value) = new {
            self.inner.add(value.clone(), id);
        }
    }

    /// Returns the handles of records whose field equals `value`, in insertion order.
    pub fn lookup(&self, value: &Value) -> &[RecordId] {
        self.inner.get(value)
    }

    /// Iterates over every value and its bucket.
    pub fn buckets(&self) -> impl Iterator<Item = (&Value, &[RecordId])> {
        self.inner.buckets()
    }

    /// Returns the number of indexed records.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if no record is indexed.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of distinct values.
    pub fn key_count(&self) -> usize {
        self.inner.key_count()
    }

    /// Returns the statistics of the underlying index.
    pub fn stats(&self) -> &IndexStats {
        self.inner.stats()
    }
}
