//! Database configuration.

use tessera_storage::LookupPolicy;

/// Options fixed when a `Database` is opened.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Lookup policy given to every table the database creates.
    pub lookup_policy: LookupPolicy,
    /// Maximum number of nested transactions. `None` means unbounded.
    pub max_transaction_depth: Option<usize>,
}

impl DatabaseConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the lookup policy for tables created from now on.
    pub fn lookup_policy(mut self, policy: LookupPolicy) -> Self {
        self.lookup_policy = policy;
        self
    }

    /// Caps transaction nesting.
    pub fn max_transaction_depth(mut self, depth: usize) -> Self {
        self.max_transaction_depth = Some(depth);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DatabaseConfig::new();
        assert_eq!(config.lookup_policy, LookupPolicy::Conjunctive);
        assert_eq!(config.max_transaction_depth, None);
    }

    #[test]
    fn test_builder() {
        let config = DatabaseConfig::new()
            .lookup_policy(LookupPolicy::FirstFieldShortcut)
            .max_transaction_depth(4);
        assert_eq!(config.lookup_policy, LookupPolicy::FirstFieldShortcut);
        assert_eq!(config.max_transaction_depth, Some(4));
    }
}
