//! Snapshot-based transaction stack.
//!
//! `begin` pushes a deep copy of the whole table registry. `commit` pops it without
//! applying it; `rollback` copies it back over the live registry and leaves it in
//! place. Nested transactions are simply deeper entries on the stack.

use tessera_storage::TableRegistry;

/// Transaction ID type. IDs are unique within one `Database`.
pub type TransactionId = u64;

/// The registry as it was when a transaction began.
#[derive(Debug)]
pub struct Snapshot {
    id: TransactionId,
    registry: TableRegistry,
}

impl Snapshot {
    /// Returns the ID of the transaction that took this snapshot.
    pub fn id(&self) -> TransactionId {
        self.id
    }

    /// Returns the captured registry.
    pub fn registry(&self) -> &TableRegistry {
        &self.registry
    }
}

/// Stack of open transactions, innermost last.
#[derive(Debug)]
pub struct TransactionStack {
    snapshots: Vec<Snapshot>,
    next_id: TransactionId,
}

impl TransactionStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self {
            snapshots: Vec::new(),
            next_id: 1,
        }
    }

    /// Captures `registry` and pushes it as a new innermost transaction.
    pub fn begin(&mut self, registry: &TableRegistry) -> TransactionId {
        let id = self.next_id;
        self.next_id += 1;
        self.snapshots.push(Snapshot {
            id,
            registry: registry.clone(),
        });
        id
    }

    /// Removes the innermost snapshot.
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.snapshots.pop()
    }

    /// Returns the innermost snapshot.
    pub fn top(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// Returns the number of open transactions.
    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns true if no transaction is open.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Discards every snapshot.
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}

impl Default for TransactionStack {
    fn default() -> Self {
        Self::new()
    }
}
