//! Table registry for Tessera.
//!
//! This module provides the `TableRegistry` struct which maps table names to tables.
//! Cloning a registry deep-copies every table, record and index bucket.

use crate::table::{LookupPolicy, Table};
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use tessera_core::{Error, RecordId, Result};

/// Registry of named tables.
#[derive(Clone, Debug, Default)]
pub struct TableRegistry {
    /// Table name → Table mapping.
    tables: BTreeMap<String, Table>,
    /// Highest `next_id` seen for each name whose table was dropped or cleared.
    high_water: BTreeMap<String, RecordId>,
}

impl TableRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            tables: BTreeMap::new(),
            high_water: BTreeMap::new(),
        }
    }

    /// Registers an empty table.
    pub fn create_table<I, S>(&mut self, name: &str, columns: I, policy: LookupPolicy) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.tables.contains_key(name) {
            return Err(Error::table_already_exists(name));
        }
        let mut table = Table::new(name, columns).with_policy(policy);
        if let Some(&mark) = self.high_water.get(name) {
            table.reserve_ids_below(mark);
        }
        self.tables.insert(name.into(), table);
        Ok(())
    }

    /// Removes a table together with its records and indexes.
    ///
    /// A table later created under the same name continues above the dropped
    /// table's handles.
    pub fn drop_table(&mut self, name: &str) -> Result<Table> {
        let table = self
            .tables
            .remove(name)
            .ok_or_else(|| Error::table_not_found(name))?;
        raise_mark(&mut self.high_water, name, table.next_id());
        Ok(table)
    }

    /// Gets a reference to a table.
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Gets a mutable reference to a table.
    pub fn get_table_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.tables.get_mut(name)
    }

    /// Checks if a table exists.
    pub fn has_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Returns the number of tables.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Returns all table names in name order.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(|s| s.as_str()).collect()
    }

    /// Returns the total record count across all tables.
    pub fn total_record_count(&self) -> usize {
        self.tables.values().map(|t| t.len()).sum()
    }

    /// Iterates over all tables in name order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> + '_ {
        self.tables.values()
    }

    /// Replaces the contents of this registry with a copy of `snapshot`.
    ///
    /// Handles issued since the snapshot are never reissued: each restored table
    /// keeps allocating above the highest counter its name has reached, including
    /// tables dropped or recreated in the meantime.
    pub fn restore_from(&mut self, snapshot: &TableRegistry) {
        let mut marks = core::mem::take(&mut self.high_water);
        for (name, table) in &self.tables {
            raise_mark(&mut marks, name, table.next_id());
        }
        for (name, &mark) in &snapshot.high_water {
            raise_mark(&mut marks, name, mark);
        }

        let mut restored = snapshot.clone();
        for (name, table) in restored.tables.iter_mut() {
            if let Some(&mark) = marks.get(name) {
                table.reserve_ids_below(mark);
            }
        }
        restored.high_water = marks;
        *self = restored;
    }

    /// Checks the indexes of every table.
    pub fn verify_indexes(&self) -> Result<()> {
        self.tables.values().try_for_each(|t| t.verify_indexes())
    }

    /// Removes every table.
    pub fn clear(&mut self) {
        for (name, table) in core::mem::take(&mut self.tables) {
            raise_mark(&mut self.high_water, &name, table.next_id());
        }
    }
}

fn raise_mark(marks: &mut BTreeMap<String, RecordId>, name: &str, next_id: RecordId) {
    match marks.get_mut(name) {
        Some(mark) => *mark = (*mark).max(next_id),
        None => {
            marks.insert(name.into(), next_id);
        }
    }
}
