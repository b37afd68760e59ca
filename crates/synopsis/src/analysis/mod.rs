//! Statistical computations over filtered views.

mod chart;
mod correlation;
mod summary;

pub use chart::{ChartAggregate, DEFAULT_BIN_COUNT, GroupAggregate, HistogramBin, aggregate};
pub use correlation::{CorrelationMatrix, correlate};
pub use summary::{SummaryStat, mean};
