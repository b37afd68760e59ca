//! Row-subset predicate over the grouping column.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Which rows to keep, expressed as an allowed value set for the grouping
/// column.
///
/// When the table has no grouping column the spec is the identity and keeps
/// every row. Allowed values that never occur in the column simply match
/// nothing; they are not an error. An empty allowed set is valid and keeps
/// zero rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    column: Option<String>,
    allowed: BTreeSet<String>,
}

impl FilterSpec {
    /// The identity spec: no grouping column, nothing filtered.
    pub fn identity() -> Self {
        Self {
            column: None,
            allowed: BTreeSet::new(),
        }
    }

    /// Keep only rows whose grouping-column value is in `values`.
    pub fn keep(column: impl Into<String>, values: impl IntoIterator<Item = String>) -> Self {
        Self {
            column: Some(column.into()),
            allowed: values.into_iter().collect(),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.column.is_none()
    }

    /// The grouping column this spec applies to, if any.
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    /// The allowed value set.
    pub fn allowed(&self) -> &BTreeSet<String> {
        &self.allowed
    }

    /// Whether a grouping-column value passes the filter.
    pub fn matches(&self, value: &str) -> bool {
        self.column.is_none() || self.allowed.contains(value.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_matches_everything() {
        let spec = FilterSpec::identity();
        assert!(spec.is_identity());
        assert!(spec.matches("anything"));
        assert!(spec.matches(""));
    }

    #[test]
    fn keep_matches_only_allowed_values() {
        let spec = FilterSpec::keep("State", vec!["A".to_string(), "B".to_string()]);
        assert!(!spec.is_identity());
        assert!(spec.matches("A"));
        assert!(spec.matches(" B "));
        assert!(!spec.matches("C"));
    }

    #[test]
    fn empty_allowed_set_matches_nothing() {
        let spec = FilterSpec::keep("State", Vec::new());
        assert!(!spec.matches("A"));
    }
}
