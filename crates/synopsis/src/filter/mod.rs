//! Row filtering over the grouping column.

mod spec;
mod view;

pub use spec::FilterSpec;
pub use view::{FilteredView, Preview};
