//! Tessera Index - Secondary index implementations for Tessera.
//!
//! This crate provides:
//!
//! - `HashIndex`: O(1) point queries mapping a key to an ordered bucket of record handles
//! - `FieldIndex`: A `HashIndex` bound to one record field, kept in step with table mutations
//! - `IndexStats`: Entry and lookup counters
//!
//! Buckets hold `RecordId` handles, never records, so an index can't keep a record alive.
//!
//! # Example
//!
//! ```rust
//! use tessera_index::{HashIndex, Index};
//!
//! let mut index: HashIndex<i32> = HashIndex::new();
//! index.add(10, 7);
//! index.add(10, 3);
//! index.add(20, 5);
//!
//! // Buckets are kept in handle order
//! assert_eq!(index.get(&10), &[3, 7]);
//! assert!(index.get(&30).is_empty());
//! ```

#![no_std]

extern crate alloc;

pub mod field;
pub mod hash;
pub mod stats;
pub mod traits;

pub use field::FieldIndex;
pub use hash::HashIndex;
pub use stats::IndexStats;
pub use traits::Index;
