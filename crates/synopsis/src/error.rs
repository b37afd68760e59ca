//! Error types for the Synopsis library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Synopsis operations.
#[derive(Debug, Error)]
pub enum SynopsisError {
    /// Error reading or accessing a source file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A data row disagrees with the header on field count.
    #[error("malformed source: row {row} has {found} fields, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Empty file or no data to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// No column classifies as numeric, so no indicator can be selected.
    #[error("table has no numeric columns; nothing to summarize")]
    NoNumericColumns,

    /// A requested column does not exist in the table.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// A column exists but is not numeric.
    #[error("column '{0}' is not numeric")]
    NotNumeric(String),

    /// The current selection leaves no usable values.
    #[error("no data for this selection: {0}")]
    EmptySelection(String),

    /// Correlation requires at least two numeric columns.
    #[error("correlation needs at least 2 numeric columns, found {found}")]
    InsufficientColumns { found: usize },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SynopsisError {
    /// Whether the error is scoped to a single computation.
    ///
    /// Recoverable errors disable one panel of a dashboard view; the other
    /// computations still run against the same filtered view. Everything
    /// else aborts session initialization or the whole render request.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SynopsisError::EmptySelection(_) | SynopsisError::InsufficientColumns { .. }
        )
    }
}

/// Result type alias for Synopsis operations.
pub type Result<T> = std::result::Result<T, SynopsisError>;
