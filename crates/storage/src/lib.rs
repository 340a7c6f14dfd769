//! Tessera Storage - Table storage layer for Tessera.
//!
//! This crate provides the storage layer:
//!
//! - `Table`: Record storage with secondary index maintenance
//! - `TableRegistry`: Name to table mapping, cloned whole for transaction snapshots
//! - `LookupPolicy`: How index hits interact with multi-field predicates
//!
//! # Example
//!
//! ```rust
//! use tessera_core::{fields, Predicate, Value};
//! use tessera_storage::Table;
//!
//! let mut table = Table::new("users", ["id", "city"]);
//! table.insert(fields([("id", Value::Int64(1)), ("city", "NY".into())]));
//! table.create_index("city");
//!
//! table.update(&Predicate::eq("id", 1i64), &fields([("city", "LA")]));
//!
//! assert!(table.find(&Predicate::eq("city", "NY")).is_empty());
//! assert_eq!(table.find(&Predicate::eq("city", "LA")).len(), 1);
//! ```

#![no_std]

extern crate alloc;

pub mod registry;
pub mod table;

pub use registry::TableRegistry;
pub use table::{LookupPolicy, Table};
