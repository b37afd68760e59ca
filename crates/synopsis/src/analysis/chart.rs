//! Chart-ready aggregation: per-group means or a binned distribution.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SynopsisError};
use crate::filter::FilteredView;
use crate::input::DataTable;

/// Default number of histogram bins when no grouping column exists.
pub const DEFAULT_BIN_COUNT: usize = 10;

/// Mean of the indicator within one group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupAggregate {
    /// Grouping-column value.
    pub group: String,
    /// Unrounded mean of the indicator over the group's usable values.
    pub mean: f64,
    /// Number of usable values in the group.
    pub count: usize,
}

/// One histogram bin over the indicator's value range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Aggregate view of an indicator, shaped for charting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartAggregate {
    /// Per-group means, in order of each group's first appearance.
    Grouped {
        indicator: String,
        groups: Vec<GroupAggregate>,
    },
    /// Binned frequency distribution over the observed value range.
    Binned {
        indicator: String,
        bins: Vec<HistogramBin>,
    },
}

/// Aggregate the indicator for charting.
///
/// With a grouping column, rows group by its value and each group reports
/// the indicator's mean under the usual missing-value exclusion; groups
/// with no usable values are omitted. Without one, the indicator's
/// non-missing values are binned over [min, max] with the top edge
/// inclusive for the last bin. A selection with no usable values is an
/// error, matching the summary engine.
pub fn aggregate(
    view: &FilteredView,
    indicator: &str,
    grouping: Option<&str>,
    bin_count: usize,
) -> Result<ChartAggregate> {
    if view.is_empty() {
        return Err(SynopsisError::EmptySelection(
            "selection has no rows".to_string(),
        ));
    }

    match grouping {
        Some(column) => group_means(view, indicator, column),
        None => histogram(view, indicator, bin_count),
    }
}

fn group_means(view: &FilteredView, indicator: &str, grouping: &str) -> Result<ChartAggregate> {
    let group_col = view
        .table()
        .column_index(grouping)
        .ok_or_else(|| SynopsisError::UnknownColumn(grouping.to_string()))?;
    let value_col = view
        .table()
        .column_index(indicator)
        .ok_or_else(|| SynopsisError::UnknownColumn(indicator.to_string()))?;

    let mut sums: IndexMap<String, (f64, usize)> = IndexMap::new();

    for (group, value) in view
        .column_values(group_col)
        .zip(view.numeric_values(value_col))
    {
        // Rows without a group key don't belong to any bar.
        if DataTable::is_missing_value(group) {
            continue;
        }
        let Some(value) = value else { continue };
        let entry = sums.entry(group.trim().to_string()).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    if sums.is_empty() {
        return Err(SynopsisError::EmptySelection(format!(
            "column '{indicator}' has no usable values"
        )));
    }

    let groups = sums
        .into_iter()
        .map(|(group, (sum, count))| GroupAggregate {
            group,
            mean: sum / count as f64,
            count,
        })
        .collect();

    Ok(ChartAggregate::Grouped {
        indicator: indicator.to_string(),
        groups,
    })
}

fn histogram(view: &FilteredView, indicator: &str, bin_count: usize) -> Result<ChartAggregate> {
    let col = view
        .table()
        .column_index(indicator)
        .ok_or_else(|| SynopsisError::UnknownColumn(indicator.to_string()))?;

    let values: Vec<f64> = view.numeric_values(col).flatten().collect();
    if values.is_empty() {
        return Err(SynopsisError::EmptySelection(format!(
            "column '{indicator}' has no usable values"
        )));
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    // Degenerate range: every value identical, one bin holds them all.
    if min == max {
        return Ok(ChartAggregate::Binned {
            indicator: indicator.to_string(),
            bins: vec![HistogramBin {
                lower: min,
                upper: max,
                count: values.len(),
            }],
        });
    }

    let bin_count = bin_count.max(1);
    let width = (max - min) / bin_count as f64;
    let mut counts = vec![0usize; bin_count];

    for &value in &values {
        // The last bin is top-inclusive, so v == max lands in it.
        let idx = (((value - min) / width) as usize).min(bin_count - 1);
        counts[idx] += 1;
    }

    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + i as f64 * width,
            upper: if i + 1 == bin_count {
                max
            } else {
                min + (i + 1) as f64 * width
            },
            count,
        })
        .collect();

    Ok(ChartAggregate::Binned {
        indicator: indicator.to_string(),
        bins,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterSpec;
    use std::sync::Arc;

    fn view(headers: Vec<&str>, rows: Vec<Vec<&str>>) -> FilteredView {
        let table = Arc::new(DataTable::new(
            headers.into_iter().map(String::from).collect(),
            rows.into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
            b',',
        ));
        FilteredView::all(table)
    }

    #[test]
    fn grouped_means_in_first_appearance_order() {
        let v = view(
            vec!["State", "X"],
            vec![
                vec!["B", "3"],
                vec!["A", "1"],
                vec!["B", "4"],
                vec!["A", "2"],
            ],
        );
        let agg = aggregate(&v, "X", Some("State"), DEFAULT_BIN_COUNT).unwrap();

        let ChartAggregate::Grouped { groups, indicator } = agg else {
            panic!("expected grouped aggregate");
        };
        assert_eq!(indicator, "X");
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].group, "B");
        assert_eq!(groups[0].mean, 3.5);
        assert_eq!(groups[1].group, "A");
        assert_eq!(groups[1].mean, 1.5);
    }

    #[test]
    fn groups_without_usable_values_are_omitted() {
        let v = view(
            vec!["State", "X"],
            vec![vec!["A", "1"], vec!["B", "NA"], vec!["B", ""]],
        );
        let agg = aggregate(&v, "X", Some("State"), DEFAULT_BIN_COUNT).unwrap();

        let ChartAggregate::Grouped { groups, .. } = agg else {
            panic!("expected grouped aggregate");
        };
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].group, "A");
    }

    #[test]
    fn rows_with_missing_group_key_are_skipped() {
        let v = view(
            vec!["State", "X"],
            vec![vec!["A", "1"], vec!["", "100"], vec!["A", "3"]],
        );
        let agg = aggregate(&v, "X", Some("State"), DEFAULT_BIN_COUNT).unwrap();

        let ChartAggregate::Grouped { groups, .. } = agg else {
            panic!("expected grouped aggregate");
        };
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].mean, 2.0);
    }

    #[test]
    fn histogram_spans_min_to_max_with_inclusive_top() {
        let v = view(
            vec!["X"],
            vec![vec!["0"], vec!["5"], vec!["10"], vec!["10"]],
        );
        let agg = aggregate(&v, "X", None, 2).unwrap();

        let ChartAggregate::Binned { bins, .. } = agg else {
            panic!("expected binned aggregate");
        };
        assert_eq!(bins.len(), 2);
        assert_eq!(bins[0].lower, 0.0);
        assert_eq!(bins[1].upper, 10.0);
        assert_eq!(bins[0].count, 1); // 0
        assert_eq!(bins[1].count, 3); // 5, 10, 10 — max lands in the last bin
    }

    #[test]
    fn histogram_counts_cover_every_value() {
        let rows: Vec<Vec<&str>> = vec![
            vec!["1"],
            vec!["2"],
            vec!["3"],
            vec!["4"],
            vec!["5"],
            vec!["6"],
        ];
        let v = view(vec!["X"], rows);
        let agg = aggregate(&v, "X", None, DEFAULT_BIN_COUNT).unwrap();

        let ChartAggregate::Binned { bins, .. } = agg else {
            panic!("expected binned aggregate");
        };
        assert_eq!(bins.len(), DEFAULT_BIN_COUNT);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 6);
    }

    #[test]
    fn degenerate_range_collapses_to_one_bin() {
        let v = view(vec!["X"], vec![vec!["7"], vec!["7"], vec!["7"]]);
        let agg = aggregate(&v, "X", None, DEFAULT_BIN_COUNT).unwrap();

        let ChartAggregate::Binned { bins, .. } = agg else {
            panic!("expected binned aggregate");
        };
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].lower, 7.0);
        assert_eq!(bins[0].upper, 7.0);
        assert_eq!(bins[0].count, 3);
    }

    #[test]
    fn zero_row_view_is_empty_selection() {
        let table = Arc::new(DataTable::new(
            vec!["State".into(), "X".into()],
            vec![vec!["A".into(), "1".into()]],
            b',',
        ));
        let empty = FilteredView::apply(table, &FilterSpec::keep("State", Vec::new())).unwrap();

        let err = aggregate(&empty, "X", Some("State"), DEFAULT_BIN_COUNT).unwrap_err();
        assert!(matches!(err, SynopsisError::EmptySelection(_)));
    }

    #[test]
    fn all_missing_indicator_is_empty_selection_in_both_shapes() {
        let v = view(vec!["State", "X"], vec![vec!["A", "NA"], vec!["B", ""]]);
        assert!(matches!(
            aggregate(&v, "X", Some("State"), DEFAULT_BIN_COUNT).unwrap_err(),
            SynopsisError::EmptySelection(_)
        ));

        let v = view(vec!["X"], vec![vec!["NA"], vec![""]]);
        assert!(matches!(
            aggregate(&v, "X", None, DEFAULT_BIN_COUNT).unwrap_err(),
            SynopsisError::EmptySelection(_)
        ));
    }
}
