//! Tessera Database - Embedded tabular record store.
//!
//! This crate ties the lower layers together behind a single owned handle:
//!
//! - `Database`: Named tables, schema-checked inserts and snapshot transactions
//! - `DatabaseConfig`: Lookup policy and transaction depth limit
//! - `SharedDatabase`: Reader/writer locked handle for multi-threaded hosts
//!
//! # Example
//!
//! ```rust
//! use tessera_database::{fields, Database, Predicate, Value};
//!
//! let mut db = Database::new();
//! db.create_table("users", ["id", "city"]).unwrap();
//! db.table_mut("users").unwrap().create_index("city");
//!
//! db.insert("users", fields([("id", Value::Int64(1)), ("city", "NY".into())])).unwrap();
//!
//! db.begin_transaction().unwrap();
//! db.table_mut("users")
//!     .unwrap()
//!     .update(&Predicate::eq("city", "NY"), &fields([("city", "LA")]));
//! db.rollback().unwrap();
//!
//! let users = db.table("users").unwrap();
//! assert_eq!(users.find(&Predicate::eq("city", "NY")).len(), 1);
//! ```

pub mod config;
pub mod database;
pub mod shared;
pub mod transaction;

pub use config::DatabaseConfig;
pub use database::Database;
pub use shared::SharedDatabase;
pub use transaction::{Snapshot, TransactionId, TransactionStack};

pub use tessera_core::{fields, Error, FieldMap, Predicate, Record, RecordId, Result, Value};
pub use tessera_index::{FieldIndex, IndexStats};
pub use tessera_storage::{LookupPolicy, Table, TableRegistry};
