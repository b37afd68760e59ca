//! Logical row subsets of a table.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::spec::FilterSpec;
use crate::error::{Result, SynopsisError};
use crate::input::DataTable;
use crate::schema::parse_number;

/// A logical subset of a table's rows.
///
/// The table is shared, never mutated; the view owns only the surviving row
/// indices. Views are cheap to clone and re-filter, and re-applying a spec
/// (or a superset of the current one) is a no-op.
#[derive(Debug, Clone)]
pub struct FilteredView {
    table: Arc<DataTable>,
    indices: Vec<usize>,
}

impl FilteredView {
    /// A view over every row of the table.
    pub fn all(table: Arc<DataTable>) -> Self {
        let indices = (0..table.row_count()).collect();
        Self { table, indices }
    }

    /// Apply a filter spec directly to a table.
    pub fn apply(table: Arc<DataTable>, spec: &FilterSpec) -> Result<Self> {
        Self::all(table).retain(spec)
    }

    /// Narrow this view by a filter spec, returning a new view.
    pub fn retain(&self, spec: &FilterSpec) -> Result<Self> {
        let Some(column) = spec.column() else {
            return Ok(self.clone());
        };

        let col = self
            .table
            .column_index(column)
            .ok_or_else(|| SynopsisError::UnknownColumn(column.to_string()))?;

        let indices = self
            .indices
            .iter()
            .copied()
            .filter(|&row| {
                self.table
                    .get(row, col)
                    .is_some_and(|value| spec.matches(value))
            })
            .collect();

        Ok(Self {
            table: Arc::clone(&self.table),
            indices,
        })
    }

    /// The underlying table.
    pub fn table(&self) -> &DataTable {
        &self.table
    }

    /// Number of rows in the view.
    pub fn row_count(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Surviving row indices, in table order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Values of a column restricted to this view's rows.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.indices
            .iter()
            .map(move |&row| self.table.get(row, index).unwrap_or(""))
    }

    /// Numeric values of a column restricted to this view's rows.
    ///
    /// Missing or unparseable cells yield `None` so callers can exclude
    /// them from both numerator and denominator.
    pub fn numeric_values(&self, index: usize) -> impl Iterator<Item = Option<f64>> + '_ {
        self.column_values(index).map(|value| {
            if DataTable::is_missing_value(value) {
                None
            } else {
                parse_number(value)
            }
        })
    }

    /// A bounded preview of the view's first rows.
    pub fn preview(&self, limit: usize) -> Preview {
        let rows = self
            .indices
            .iter()
            .take(limit)
            .filter_map(|&row| self.table.rows.get(row).cloned())
            .collect();

        Preview {
            headers: self.table.headers.clone(),
            rows,
        }
    }
}

/// The first few rows of a filtered view, for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}
