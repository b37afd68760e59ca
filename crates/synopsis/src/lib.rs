//! Synopsis: descriptive statistics for delimited tabular datasets.
//!
//! Synopsis loads a delimited file once, classifies its columns into numeric
//! vs categorical, optionally restricts rows by a categorical grouping
//! column, and computes the views a dashboard needs: a mean summary, a
//! pairwise Pearson correlation matrix, and a chart-ready aggregate
//! (per-group means, or a histogram when no grouping column exists).
//!
//! # Design
//!
//! - **Load once**: parsed tables are cached per source path for the
//!   process lifetime and never re-read.
//! - **Classify once**: column types are inferred in a single pass at open
//!   time; downstream code never re-infers.
//! - **Filter once per request**: each render applies the row filter a
//!   single time and feeds the same view to every computation.
//! - **Scoped failures**: an empty selection disables one panel, never the
//!   whole view.
//!
//! # Example
//!
//! ```no_run
//! use synopsis::{Dashboard, Selection};
//!
//! let dashboard = Dashboard::new();
//! let session = dashboard.open("survey.csv").unwrap();
//!
//! let selection = Selection::indicator("Fertility Rate")
//!     .with_groups(["Kerala".to_string(), "Goa".to_string()]);
//! let view = session.render(&selection).unwrap();
//!
//! if let Some(stat) = view.summary.as_ready() {
//!     println!("mean: {:.2}", stat.display_mean());
//! }
//! ```

pub mod analysis;
pub mod error;
pub mod filter;
pub mod input;
pub mod schema;

mod dashboard;

pub use crate::dashboard::{Dashboard, DashboardConfig, DashboardView, Panel, Selection, Session};
pub use analysis::{
    ChartAggregate, CorrelationMatrix, DEFAULT_BIN_COUNT, GroupAggregate, HistogramBin,
    SummaryStat,
};
pub use error::{Result, SynopsisError};
pub use filter::{FilterSpec, FilteredView, Preview};
pub use input::{DataTable, Dataset, DatasetCache, Parser, ParserConfig, SourceMetadata};
pub use schema::{Classifier, ClassifierConfig, ColumnClass, ColumnProfile, TableProfile};
