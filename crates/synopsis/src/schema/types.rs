//! Column classification types.

use serde::{Deserialize, Serialize};

/// Semantic class of a column.
///
/// A column is numeric when every non-missing value parses as a number;
/// anything else is categorical text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnClass {
    Numeric,
    Categorical,
}

impl ColumnClass {
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnClass::Numeric)
    }
}

/// Classification record for a single column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Column name.
    pub name: String,
    /// Zero-based position in the table.
    pub position: usize,
    /// Inferred class.
    pub class: ColumnClass,
    /// Number of missing values.
    pub missing_count: usize,
    /// Distinct non-missing values in first-appearance order.
    ///
    /// Collected for categorical columns (and for the grouping column
    /// regardless of class) so the rendering layer can offer a value picker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distinct_values: Option<Vec<String>>,
}

/// Classification of an entire table.
///
/// Derived once at load time and immutable for the process lifetime unless
/// the table is reloaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableProfile {
    /// Per-column classification, in table order.
    pub columns: Vec<ColumnProfile>,
    /// Name of the recognized grouping column, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grouping: Option<String>,
    /// Number of data rows in the classified table.
    pub row_count: usize,
}

impl TableProfile {
    /// Get a column profile by name.
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Names of all numeric columns, in table order.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.class.is_numeric())
            .map(|c| c.name.clone())
            .collect()
    }

    /// Whether the named column exists and is numeric.
    pub fn is_numeric(&self, name: &str) -> bool {
        self.column(name).is_some_and(|c| c.class.is_numeric())
    }

    /// Distinct observed values of the grouping column, when one exists.
    pub fn grouping_values(&self) -> Option<&[String]> {
        let name = self.grouping.as_deref()?;
        self.column(name)?.distinct_values.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> TableProfile {
        TableProfile {
            columns: vec![
                ColumnProfile {
                    name: "State".into(),
                    position: 0,
                    class: ColumnClass::Categorical,
                    missing_count: 0,
                    distinct_values: Some(vec!["A".into(), "B".into()]),
                },
                ColumnProfile {
                    name: "X".into(),
                    position: 1,
                    class: ColumnClass::Numeric,
                    missing_count: 1,
                    distinct_values: None,
                },
            ],
            grouping: Some("State".into()),
            row_count: 4,
        }
    }

    #[test]
    fn numeric_lookup() {
        let p = profile();
        assert_eq!(p.numeric_columns(), vec!["X".to_string()]);
        assert!(p.is_numeric("X"));
        assert!(!p.is_numeric("State"));
        assert!(!p.is_numeric("missing"));
    }

    #[test]
    fn grouping_values_come_from_the_grouping_column() {
        let p = profile();
        assert_eq!(
            p.grouping_values(),
            Some(&["A".to_string(), "B".to_string()][..])
        );
    }
}
