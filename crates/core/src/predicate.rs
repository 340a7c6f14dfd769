//! Equality predicates.
//!
//! A `Predicate` is an ordered conjunction of `field = value` tests. The order is
//! significant: index lookups key off the first term.

use crate::record::FieldMap;
use crate::value::Value;
use alloc::string::String;
use alloc::vec::Vec;

/// An ordered conjunction of `field = value` conditions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Predicate {
    terms: Vec<(String, Value)>,
}

impl Predicate {
    /// Creates an empty predicate, which matches every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Creates a single-term predicate.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::all().and(field, value)
    }

    /// Appends a term.
    ///
    /// A repeated field keeps both terms, so `a = 1 AND a = 2` matches nothing.
    pub fn and(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.terms.push((field.into(), value.into()));
        self
    }

    /// Returns the first term, if any.
    pub fn first(&self) -> Option<(&str, &Value)> {
        self.terms.first().map(|(f, v)| (f.as_str(), v))
    }

    /// Returns all terms in order.
    pub fn terms(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.terms.iter().map(|(f, v)| (f.as_str(), v))
    }

    /// Returns the number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if the predicate has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Tests every term against `fields`. A missing field never matches.
    pub fn matches(&self, fields: &FieldMap) -> bool {
        self.terms
            .iter()
            .all(|(field, value)| fields.get(field) == Some(value))
    }
}

impl<K, V> FromIterator<(K, V)> for Predicate
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Predicate::all(), |pred, (k, v)| pred.and(k, v))
    }
}
