//! Input parsing, caching, and data source handling.

mod cache;
mod parser;
mod source;

pub use cache::{Dataset, DatasetCache};
pub use parser::{Parser, ParserConfig};
pub use source::{DataTable, SourceMetadata};
