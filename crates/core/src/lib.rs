//! Tessera Core - Core types for the Tessera embedded record store.
//!
//! This crate provides the foundational types shared by every layer:
//!
//! - `Value`: Runtime values that can be stored in a record field
//! - `FieldMap`: Column name to value mapping carried by every record
//! - `Record`: A stored record with a stable handle and a freshness flag
//! - `Predicate`: An ordered conjunction of `field = value` tests
//! - `Error`: Error types for database operations
//!
//! # Example
//!
//! ```rust
//! use tessera_core::{fields, Predicate, Record, Value};
//!
//! let record = Record::new(0, fields([("id", Value::Int64(1)), ("name", "Alice".into())]));
//! assert!(record.is_fresh());
//!
//! let pred = Predicate::eq("name", "Alice");
//! assert!(pred.matches(record.fields()));
//! ```

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod error;
mod predicate;
mod record;
mod value;

pub use error::{Error, Result};
pub use predicate::Predicate;
pub use record::{fields, FieldMap, Record, RecordId};
pub use value::Value;
