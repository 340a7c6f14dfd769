//! Error types for Tessera.

use alloc::string::String;
use core::fmt;

/// Result type alias for Tessera operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for Tessera database operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The database has been closed.
    Closed,
    /// A table with this name is already registered.
    TableAlreadyExists {
        name: String,
    },
    /// No table is registered under this name.
    TableNotFound {
        name: String,
    },
    /// A schema-checked insert lacked a declared column.
    MissingRequiredField {
        table: String,
        column: String,
    },
    /// Commit or rollback with an empty transaction stack.
    NoActiveTransaction,
    /// Begin would nest deeper than the configured limit.
    TransactionDepthExceeded {
        limit: usize,
    },
    /// An index no longer mirrors the table's records.
    IndexInconsistent {
        table: String,
        field: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Closed => write!(f, "Cannot perform operations on a closed database"),
            Error::TableAlreadyExists { name } => {
                write!(f, "Table already exists: {}", name)
            }
            Error::TableNotFound { name } => {
                write!(f, "Table not found: {}", name)
            }
            Error::MissingRequiredField { table, column } => {
                write!(f, "Missing required field {} for table {}", column, table)
            }
            Error::NoActiveTransaction => write!(f, "No active transaction"),
            Error::TransactionDepthExceeded { limit } => {
                write!(f, "Transaction depth limit of {} exceeded", limit)
            }
            Error::IndexInconsistent { table, field } => {
                write!(f, "Index on {} in table {} is inconsistent", field, table)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl Error {
    /// Creates a table already exists error.
    pub fn table_already_exists(name: impl Into<String>) -> Self {
        Error::TableAlreadyExists { name: name.into() }
    }

    /// Creates a table not found error.
    pub fn table_not_found(name: impl Into<String>) -> Self {
        Error::TableNotFound { name: name.into() }
    }

    /// Creates a missing required field error.
    pub fn missing_field(table: impl Into<String>, column: impl Into<String>) -> Self {
        Error::MissingRequiredField {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Creates an index inconsistency error.
    pub fn index_inconsistent(table: impl Into<String>, field: impl Into<String>) -> Self {
        Error::IndexInconsistent {
            table: table.into(),
            field: field.into(),
        }
    }
}
