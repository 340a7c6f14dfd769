//! Table storage for Tessera.
//!
//! This module provides the `Table` struct which owns the records of a single table
//! and keeps every secondary index in step with each insert, update and delete.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use tessera_core::{Error, FieldMap, Predicate, Record, RecordId, Result};
use tessera_index::FieldIndex;

/// How `find` treats the predicate terms after the first one when the first field is indexed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LookupPolicy {
    /// The index narrows the candidates, then the whole conjunction is applied.
    #[default]
    Conjunctive,
    /// The index bucket for the first term is returned as-is; later terms are ignored.
    FirstFieldShortcut,
}

/// Record storage for a single table.
///
/// Records are keyed by `RecordId`. Handles grow monotonically, so key order is
/// insertion order and doubles as the canonical iteration order.
#[derive(Clone, Debug)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    records: BTreeMap<RecordId, Record>,
    indexes: BTreeMap<String, FieldIndex>,
    next_id: RecordId,
    policy: LookupPolicy,
}

impl Table {
    /// Creates an empty table with the given required columns.
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            records: BTreeMap::new(),
            indexes: BTreeMap::new(),
            next_id: 0,
            policy: LookupPolicy::default(),
        }
    }

    /// Sets the lookup policy.
    pub fn with_policy(mut self, policy: LookupPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the table name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the required columns in declaration order.
    #[inline]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the lookup policy.
    #[inline]
    pub fn policy(&self) -> LookupPolicy {
        self.policy
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the table holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the handle the next inserted record will receive.
    pub fn next_id(&self) -> RecordId {
        self.next_id
    }

    /// Makes sure no handle below `floor` is handed out again.
    pub fn reserve_ids_below(&mut self, floor: RecordId) {
        self.next_id = self.next_id.max(floor);
    }

    /// Inserts a record without schema checks and files it in every index.
    pub fn insert(&mut self, fields: FieldMap) -> RecordId {
        let id = self.next_id;
        self.next_id += 1;

        for index in self.indexes.values_mut() {
            index.insert(id, &fields);
        }
        self.records.insert(id, Record::new(id, fields));
        id
    }

    /// Gets a record by handle.
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.get(&id)
    }

    /// Finds the records matching `predicate`, in insertion order.
    pub fn find(&self, predicate: &Predicate) -> Vec<&Record> {
        self.find_ids(predicate)
            .into_iter()
            .filter_map(|id| self.records.get(&id))
            .collect()
    }

    /// Merges `patch` into every matching record and re-files it in each index.
    ///
    /// Returns the number of records updated.
    pub fn update(&mut self, predicate: &Predicate, patch: &FieldMap) -> usize {
        let ids = self.find_ids(predicate);
        let Self {
            records, indexes, ..
        } = self;

        let mut updated = 0;
        for id in ids {
            let Some(record) = records.get_mut(&id) else {
                continue;
            };
            // Move out of the old bucket before the old value is overwritten.
            for index in indexes.values_mut() {
                let field = index.field();
                if let Some(new_value) = patch.get(field) {
                    let old_value = record.get(field);
                    index.refile(id, old_value, Some(new_value));
                }
            }
            record.apply(patch);
            updated += 1;
        }
        updated
    }

    /// Removes every matching record from the table and from every index.
    ///
    /// Returns the removed records, already marked stale.
    pub fn delete(&mut self, predicate: &Predicate) -> Vec<Record> {
        let ids = self.find_ids(predicate);
        let mut removed = Vec::with_capacity(ids.len());
        for id in ids {
            let Some(mut record) = self.records.remove(&id) else {
                continue;
            };
            for index in self.indexes.values_mut() {
                index.remove(id, record.fields());
            }
            record.mark_stale();
            removed.push(record);
        }
        removed
    }

    /// Returns every record accepted by `filter`, in insertion order.
    pub fn scan<F>(&self, mut filter: F) -> Vec<&Record>
    where
        F: FnMut(&Record) -> bool,
    {
        self.records.values().filter(|r| filter(r)).collect()
    }

    /// Returns all records in insertion order.
    pub fn get_all(&self) -> Vec<&Record> {
        self.records.values().collect()
    }

    /// Returns an iterator over all records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> + '_ {
        self.records.values()
    }

    /// Creates an index on `field` from the current records.
    ///
    /// Returns false, without touching the existing index, if `field` is already indexed.
    pub fn create_index(&mut self, field: &str) -> bool {
        if self.indexes.contains_key(field) {
            return false;
        }
        let index = FieldIndex::build(
            field,
            self.records.iter().map(|(id, r)| (*id, r.fields())),
        );
        self.indexes.insert(field.into(), index);
        true
    }

    /// Returns true if `field` is indexed.
    pub fn has_index(&self, field: &str) -> bool {
        self.indexes.contains_key(field)
    }

    /// Returns the index on `field`, if any.
    pub fn index(&self, field: &str) -> Option<&FieldIndex> {
        self.indexes.get(field)
    }

    /// Returns the indexed fields in name order.
    pub fn indexed_fields(&self) -> impl Iterator<Item = &str> + '_ {
        self.indexes.keys().map(|f| f.as_str())
    }

    /// Checks that every index holds each record exactly once, under its current value.
    pub fn verify_indexes(&self) -> Result<()> {
        for (field, index) in &self.indexes {
            let mut filed = 0;
            for (value, ids) in index.buckets() {
                for id in ids {
                    let current = self.records.get(id).and_then(|r| r.get(field));
                    if current != Some(value) {
                        return Err(Error::index_inconsistent(self.name.as_str(), field.as_str()));
                    }
                }
                filed += ids.len();
            }
            let expected = self.records.values().filter(|r| r.get(field).is_some()).count();
            if filed != expected {
                return Err(Error::index_inconsistent(self.name.as_str(), field.as_str()));
            }
        }
        Ok(())
    }

    fn find_ids(&self, predicate: &Predicate) -> Vec<RecordId> {
        if let Some((field, value)) = predicate.first() {
            if let Some(index) = self.indexes.get(field) {
                let hits = index.lookup(value);
                return match self.policy {
                    LookupPolicy::FirstFieldShortcut => hits.to_vec(),
                    LookupPolicy::Conjunctive => hits
                        .iter()
                        .copied()
                        .filter(|id| {
                            self.records
                                .get(id)
                                .map_or(false, |r| predicate.matches(r.fields()))
                        })
                        .collect(),
                };
            }
        }
        self.records
            .values()
            .filter(|r| predicate.matches(r.fields()))
            .map(|r| r.id())
            .collect()
    }
}
