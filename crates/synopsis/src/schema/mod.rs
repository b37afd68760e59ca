//! Column classification: numeric vs categorical, grouping detection.

mod classify;
mod types;

pub use classify::{Classifier, ClassifierConfig, parse_number};
pub use types::{ColumnClass, ColumnProfile, TableProfile};
