//! Thread-safe database handle.

use crate::config::DatabaseConfig;
use crate::database::Database;
use parking_lot::RwLock;
use std::sync::Arc;

/// A `Database` shared between threads.
///
/// Reads (`find`, `scan`, introspection) share the lock. Anything that mutates
/// tables, snapshots the registry or touches the transaction stack takes it
/// exclusively.
#[derive(Clone, Debug, Default)]
pub struct SharedDatabase {
    inner: Arc<RwLock<Database>>,
}

impl SharedDatabase {
    /// Wraps an existing database.
    pub fn new(db: Database) -> Self {
        Self {
            inner: Arc::new(RwLock::new(db)),
        }
    }

    /// Opens a new shared database with the given configuration.
    pub fn with_config(config: DatabaseConfig) -> Self {
        Self::new(Database::with_config(config))
    }

    /// Runs `f` under the shared read lock.
    pub fn read<R>(&self, f: impl FnOnce(&Database) -> R) -> R {
        f(&self.inner.read())
    }

    /// Runs `f` under the exclusive write lock.
    pub fn write<R>(&self, f: impl FnOnce(&mut Database) -> R) -> R {
        f(&mut self.inner.write())
    }
}

impl From<Database> for SharedDatabase {
    fn from(db: Database) -> Self {
        Self::new(db)
    }
}
