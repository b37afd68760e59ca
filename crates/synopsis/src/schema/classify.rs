//! Column classification pass.
//!
//! Runs once per loaded table and produces the [`TableProfile`] every
//! downstream component consumes, so numeric-ness is never re-inferred at
//! use sites.

use indexmap::IndexSet;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use super::types::{ColumnClass, ColumnProfile, TableProfile};
use crate::error::{Result, SynopsisError};
use crate::input::DataTable;

/// Thousands-separated number, e.g. "12,345" or "-1,234,567.89".
static GROUPED_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?\d{1,3}(,\d{3})+(\.\d+)?$").expect("valid pattern")
});

/// Parse a cell as a number.
///
/// Accepts plain `f64` syntax and thousands-separated values, which survey
/// exports commonly carry. Non-finite results count as unparseable.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();

    let parsed = if let Ok(n) = trimmed.parse::<f64>() {
        Some(n)
    } else if GROUPED_NUMBER.is_match(trimmed) {
        trimmed.replace(',', "").parse::<f64>().ok()
    } else {
        None
    };

    parsed.filter(|n| n.is_finite())
}

/// Classifier configuration.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Recognized name of the grouping column.
    pub grouping_column: String,
    /// Distinct-value lists longer than this are not retained, except for
    /// the grouping column.
    pub distinct_limit: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            grouping_column: "State".to_string(),
            distinct_limit: 50,
        }
    }
}

/// Classifies table columns into numeric vs categorical.
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new() -> Self {
        Self {
            config: ClassifierConfig::default(),
        }
    }

    pub fn with_config(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Classify every column of a table.
    ///
    /// A column is numeric when every non-missing value parses as a number
    /// (a column with only missing values classifies numeric as well; its
    /// statistics then surface as an empty selection). Fails when no column
    /// is numeric, since no indicator could ever be selected. A missing
    /// grouping column is not an error.
    pub fn classify(&self, table: &DataTable) -> Result<TableProfile> {
        let grouping = table
            .headers
            .iter()
            .find(|h| **h == self.config.grouping_column)
            .cloned();

        let mut columns = Vec::with_capacity(table.column_count());

        for (position, name) in table.headers.iter().enumerate() {
            let mut missing_count = 0;
            let mut all_numeric = true;
            let mut distinct: IndexSet<String> = IndexSet::new();

            for value in table.column_values(position) {
                if DataTable::is_missing_value(value) {
                    missing_count += 1;
                    continue;
                }
                if parse_number(value).is_none() {
                    all_numeric = false;
                }
                distinct.insert(value.trim().to_string());
            }

            let class = if all_numeric {
                ColumnClass::Numeric
            } else {
                ColumnClass::Categorical
            };

            let is_grouping = grouping.as_deref() == Some(name.as_str());
            let keep_distinct = is_grouping
                || (class == ColumnClass::Categorical && distinct.len() <= self.config.distinct_limit);
            let distinct_values = keep_distinct.then(|| distinct.into_iter().collect());

            columns.push(ColumnProfile {
                name: name.clone(),
                position,
                class,
                missing_count,
                distinct_values,
            });
        }

        if !columns.iter().any(|c| c.class.is_numeric()) {
            return Err(SynopsisError::NoNumericColumns);
        }

        debug!(
            "classified {} columns ({} numeric), grouping column {:?}",
            columns.len(),
            columns.iter().filter(|c| c.class.is_numeric()).count(),
            grouping
        );

        Ok(TableProfile {
            columns,
            grouping,
            row_count: table.row_count(),
        })
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}
