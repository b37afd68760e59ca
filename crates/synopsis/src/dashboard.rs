//! Top-level pipeline: open a dataset once, render views per selection.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use log::debug;
use serde::Serialize;

use crate::analysis::{self, ChartAggregate, CorrelationMatrix, DEFAULT_BIN_COUNT, SummaryStat};
use crate::error::{Result, SynopsisError};
use crate::filter::{FilterSpec, FilteredView, Preview};
use crate::input::{Dataset, DatasetCache, Parser, ParserConfig, SourceMetadata};
use crate::schema::{Classifier, ClassifierConfig, TableProfile};

/// Number of preview rows handed to the rendering layer.
const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Configuration for the dashboard pipeline.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Classifier configuration.
    pub classifier: ClassifierConfig,
    /// Rows included in the bounded preview.
    pub preview_rows: usize,
    /// Histogram bin count for ungrouped chart aggregation.
    pub histogram_bins: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            classifier: ClassifierConfig::default(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
            histogram_bins: DEFAULT_BIN_COUNT,
        }
    }
}

/// The two selection inputs collected by the rendering layer.
#[derive(Debug, Clone, Serialize)]
pub struct Selection {
    /// The numeric column to summarize and chart.
    pub indicator: String,
    /// Allowed grouping-column values; `None` keeps every row.
    pub groups: Option<BTreeSet<String>>,
}

impl Selection {
    /// Select an indicator with no group restriction.
    pub fn indicator(name: impl Into<String>) -> Self {
        Self {
            indicator: name.into(),
            groups: None,
        }
    }

    /// Restrict the grouping column to the given values.
    pub fn with_groups(mut self, groups: impl IntoIterator<Item = String>) -> Self {
        self.groups = Some(groups.into_iter().collect());
        self
    }
}

/// One panel of a dashboard view.
///
/// A recoverable computation failure disables its own panel only; the
/// sibling panels still render from the same filtered view.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Panel<T> {
    Ready(T),
    Unavailable { reason: String },
}

impl<T> Panel<T> {
    fn from_result(result: Result<T>) -> Result<Self> {
        match result {
            Ok(value) => Ok(Panel::Ready(value)),
            Err(e) if e.is_recoverable() => Ok(Panel::Unavailable {
                reason: e.to_string(),
            }),
            Err(e) => Err(e),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Panel::Ready(_))
    }

    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Panel::Ready(value) => Some(value),
            Panel::Unavailable { .. } => None,
        }
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            Panel::Ready(_) => None,
            Panel::Unavailable { reason } => Some(reason),
        }
    }
}

/// Everything the rendering layer needs for one selection.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    /// The selected indicator.
    pub indicator: String,
    /// Rows in the filtered view (before missing-value exclusion).
    pub row_count: usize,
    /// Mean summary panel.
    pub summary: Panel<SummaryStat>,
    /// Chart aggregate panel.
    pub chart: Panel<ChartAggregate>,
    /// Correlation matrix panel.
    pub correlation: Panel<CorrelationMatrix>,
    /// First rows of the filtered view.
    pub preview: Preview,
}

/// The dashboard pipeline: loader cache + classifier.
pub struct Dashboard {
    config: DashboardConfig,
    cache: DatasetCache,
    classifier: Classifier,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::with_config(DashboardConfig::default())
    }

    pub fn with_config(config: DashboardConfig) -> Self {
        let cache = DatasetCache::new(Parser::with_config(config.parser.clone()));
        let classifier = Classifier::with_config(config.classifier.clone());
        Self {
            config,
            cache,
            classifier,
        }
    }

    /// Load and classify a dataset.
    ///
    /// Load and schema errors are fatal and abort here, before any
    /// computation. Re-opening the same path reuses the cached table.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<Session> {
        let dataset = self.cache.load(path)?;
        let profile = self.classifier.classify(&dataset.table)?;

        debug!(
            "opened {} ({} rows, {} columns)",
            dataset.source.file,
            dataset.table.row_count(),
            dataset.table.column_count()
        );

        Ok(Session {
            dataset,
            profile,
            preview_rows: self.config.preview_rows,
            histogram_bins: self.config.histogram_bins,
        })
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

/// An open dataset plus its classification, ready to serve render requests.
#[derive(Debug)]
pub struct Session {
    dataset: Arc<Dataset>,
    profile: TableProfile,
    preview_rows: usize,
    histogram_bins: usize,
}

impl Session {
    /// The column classification derived at open time.
    pub fn profile(&self) -> &TableProfile {
        &self.profile
    }

    /// Provenance of the loaded source.
    pub fn source(&self) -> &SourceMetadata {
        &self.dataset.source
    }

    /// Selectable indicator columns, in table order.
    pub fn indicators(&self) -> Vec<String> {
        self.profile.numeric_columns()
    }

    /// The default selection: first numeric column, every group allowed.
    pub fn default_selection(&self) -> Option<Selection> {
        self.indicators().into_iter().next().map(Selection::indicator)
    }

    /// Render one full dashboard view for a selection.
    ///
    /// The filter is applied once; all three computations and the preview
    /// consume the same filtered view. Recoverable failures come back as
    /// [`Panel::Unavailable`] without suppressing the other panels.
    pub fn render(&self, selection: &Selection) -> Result<DashboardView> {
        let indicator = selection.indicator.as_str();
        if self.profile.column(indicator).is_none() {
            return Err(SynopsisError::UnknownColumn(indicator.to_string()));
        }
        if !self.profile.is_numeric(indicator) {
            return Err(SynopsisError::NotNumeric(indicator.to_string()));
        }

        let spec = match (self.profile.grouping.as_deref(), &selection.groups) {
            (Some(column), Some(groups)) => FilterSpec::keep(column, groups.iter().cloned()),
            _ => FilterSpec::identity(),
        };

        let view = FilteredView::apply(Arc::clone(&self.dataset.table), &spec)?;
        debug!(
            "rendering '{}': {} of {} rows selected",
            indicator,
            view.row_count(),
            self.dataset.table.row_count()
        );

        let summary = Panel::from_result(analysis::mean(&view, indicator))?;
        let chart = Panel::from_result(analysis::aggregate(
            &view,
            indicator,
            self.profile.grouping.as_deref(),
            self.histogram_bins,
        ))?;
        let correlation =
            Panel::from_result(analysis::correlate(&view, &self.profile.numeric_columns()))?;

        Ok(DashboardView {
            indicator: indicator.to_string(),
            row_count: view.row_count(),
            summary,
            chart,
            correlation,
            preview: view.preview(self.preview_rows),
        })
    }
}
