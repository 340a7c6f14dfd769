//! Database - Main entry point for Tessera.
//!
//! A `Database` owns a registry of named tables and a stack of snapshot
//! transactions. Every table and transaction operation checks the closed flag
//! first; once closed the database stays closed.

use crate::config::DatabaseConfig;
use crate::transaction::{TransactionId, TransactionStack};
use tessera_core::{Error, FieldMap, RecordId, Result};
use tessera_storage::{Table, TableRegistry};

/// The main database handle.
#[derive(Debug, Default)]
pub struct Database {
    config: DatabaseConfig,
    registry: TableRegistry,
    transactions: TransactionStack,
    closed: bool,
}

impl Database {
    /// Opens an empty database with the default configuration.
    pub fn new() -> Self {
        Self::with_config(DatabaseConfig::default())
    }

    /// Opens an empty database with the given configuration.
    pub fn with_config(config: DatabaseConfig) -> Self {
        Self {
            config,
            registry: TableRegistry::new(),
            transactions: TransactionStack::new(),
            closed: false,
        }
    }

    /// Returns the configuration this database was opened with.
    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    fn check_open(&self, operation: &'static str) -> Result<()> {
        if self.closed {
            tracing::warn!(operation, "rejected call on closed database");
            return Err(Error::Closed);
        }
        Ok(())
    }

    /// Registers an empty table with the given schema columns.
    pub fn create_table<I, S>(&mut self, name: &str, columns: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.check_open("create_table")?;
        self.registry
            .create_table(name, columns, self.config.lookup_policy)?;
        tracing::debug!("Created table: {}", name);
        Ok(())
    }

    /// Gets a table by name.
    ///
    /// Calls made directly on the table bypass the schema check of [`Database::insert`].
    pub fn table(&self, name: &str) -> Result<&Table> {
        self.check_open("table")?;
        self.registry
            .get_table(name)
            .ok_or_else(|| Error::table_not_found(name))
    }

    /// Gets a mutable table by name.
    pub fn table_mut(&mut self, name: &str) -> Result<&mut Table> {
        self.check_open("table_mut")?;
        self.registry
            .get_table_mut(name)
            .ok_or_else(|| Error::table_not_found(name))
    }

    /// Removes a table together with its records and indexes.
    pub fn drop_table(&mut self, name: &str) -> Result<()> {
        self.check_open("drop_table")?;
        let table = self.registry.drop_table(name)?;
        tracing::debug!("Dropped table '{}' with {} records", name, table.len());
        Ok(())
    }

    /// Inserts a record after checking it against the table schema.
    ///
    /// Every schema column must be present; fields outside the schema are
    /// dropped. Nothing is stored when a column is missing.
    pub fn insert(&mut self, table: &str, mut fields: FieldMap) -> Result<RecordId> {
        self.check_open("insert")?;
        let target = self
            .registry
            .get_table_mut(table)
            .ok_or_else(|| Error::table_not_found(table))?;

        let mut row = FieldMap::new();
        for column in target.columns() {
            // Repeated schema columns were already copied.
            if row.contains_key(column.as_str()) {
                continue;
            }
            match fields.remove(column.as_str()) {
                Some(value) => {
                    row.insert(column.clone(), value);
                }
                None => return Err(Error::missing_field(table, column.as_str())),
            }
        }
        Ok(target.insert(row))
    }

    /// Starts a (possibly nested) transaction by snapshotting every table.
    pub fn begin_transaction(&mut self) -> Result<TransactionId> {
        self.check_open("begin_transaction")?;
        if let Some(limit) = self.config.max_transaction_depth {
            if self.transactions.depth() >= limit {
                return Err(Error::TransactionDepthExceeded { limit });
            }
        }
        let id = self.transactions.begin(&self.registry);
        tracing::debug!(
            "Began transaction {} (depth {})",
            id,
            self.transactions.depth()
        );
        Ok(id)
    }

    /// Ends the innermost transaction, keeping the live state.
    pub fn commit(&mut self) -> Result<()> {
        self.check_open("commit")?;
        let snapshot = self.transactions.pop().ok_or(Error::NoActiveTransaction)?;
        tracing::debug!(
            "Committed transaction {} (depth {})",
            snapshot.id(),
            self.transactions.depth()
        );
        Ok(())
    }

    /// Restores the live state to the innermost snapshot.
    ///
    /// The snapshot stays on the stack, so a second rollback returns to the same
    /// point. Use [`Database::abort`] to restore and end the transaction.
    pub fn rollback(&mut self) -> Result<()> {
        self.check_open("rollback")?;
        let snapshot = self.transactions.top().ok_or(Error::NoActiveTransaction)?;
        self.registry.restore_from(snapshot.registry());
        debug_assert!(self.registry.verify_indexes().is_ok());
        tracing::debug!(
            "Rolled back to transaction {} (depth {})",
            snapshot.id(),
            self.transactions.depth()
        );
        Ok(())
    }

    /// Restores the live state to the innermost snapshot and ends that transaction.
    pub fn abort(&mut self) -> Result<()> {
        self.check_open("abort")?;
        let snapshot = self.transactions.pop().ok_or(Error::NoActiveTransaction)?;
        self.registry.restore_from(snapshot.registry());
        debug_assert!(self.registry.verify_indexes().is_ok());
        tracing::debug!(
            "Aborted transaction {} (depth {})",
            snapshot.id(),
            self.transactions.depth()
        );
        Ok(())
    }

    /// Runs `f` inside a transaction.
    ///
    /// Commits when `f` returns `Ok`, aborts when it returns `Err`.
    pub fn with_transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T>,
    {
        self.begin_transaction()?;
        match f(self) {
            Ok(value) => {
                self.commit()?;
                Ok(value)
            }
            Err(err) => {
                // A closed database has nothing left to restore.
                if !self.closed {
                    self.abort()?;
                }
                Err(err)
            }
        }
    }

    /// Closes the database, discarding every table and open transaction.
    ///
    /// Closing twice is a no-op.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        tracing::info!(
            tables = self.registry.table_count(),
            open_transactions = self.transactions.depth(),
            "Closing database"
        );
        self.registry.clear();
        self.transactions.clear();
        self.closed = true;
    }

    /// Returns true once `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns the registered table names in name order.
    ///
    /// This and the other introspection methods below do not go through the
    /// closed guard. A closed database has no tables, so they report it as empty.
    pub fn table_names(&self) -> Vec<&str> {
        self.registry.table_names()
    }

    /// Checks if a table is registered.
    pub fn has_table(&self, name: &str) -> bool {
        self.registry.has_table(name)
    }

    /// Returns the number of open transactions.
    pub fn transaction_depth(&self) -> usize {
        self.transactions.depth()
    }

    /// Returns the number of records across all tables.
    pub fn total_record_count(&self) -> usize {
        self.registry.total_record_count()
    }

    /// Checks every index against its table.
    pub fn verify_indexes(&self) -> Result<()> {
        self.check_open("verify_indexes")?;
        self.registry.verify_indexes()
    }
}
