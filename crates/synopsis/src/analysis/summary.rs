//! Mean summary of a selected indicator.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SynopsisError};
use crate::filter::FilteredView;

/// Mean of an indicator over a filtered view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStat {
    /// Indicator column name.
    pub indicator: String,
    /// Unrounded arithmetic mean. This is the true result; use it for any
    /// further derivation.
    pub mean: f64,
    /// Number of non-missing values the mean was computed over.
    pub count: usize,
}

impl SummaryStat {
    /// The mean rounded to 2 decimal digits, for display only.
    pub fn display_mean(&self) -> f64 {
        (self.mean * 100.0).round() / 100.0
    }
}

/// Compute the mean of `indicator` over the view's non-missing values.
///
/// Missing values are excluded from both numerator and denominator. A
/// selection with zero usable values is reported as an error, never as NaN
/// or a silent zero.
pub fn mean(view: &FilteredView, indicator: &str) -> Result<SummaryStat> {
    let col = view
        .table()
        .column_index(indicator)
        .ok_or_else(|| SynopsisError::UnknownColumn(indicator.to_string()))?;

    let mut sum = 0.0;
    let mut count = 0usize;
    for value in view.numeric_values(col).flatten() {
        sum += value;
        count += 1;
    }

    if count == 0 {
        return Err(SynopsisError::EmptySelection(format!(
            "column '{indicator}' has no usable values"
        )));
    }

    Ok(SummaryStat {
        indicator: indicator.to_string(),
        mean: sum / count as f64,
        count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterSpec;
    use crate::input::DataTable;
    use std::sync::Arc;

    fn view(values: Vec<&str>) -> FilteredView {
        let table = Arc::new(DataTable::new(
            vec!["X".into()],
            values.into_iter().map(|v| vec![v.to_string()]).collect(),
            b',',
        ));
        FilteredView::all(table)
    }

    #[test]
    fn mean_over_plain_values() {
        let stat = mean(&view(vec!["1", "2", "3", "4"]), "X").unwrap();
        assert_eq!(stat.mean, 2.5);
        assert_eq!(stat.count, 4);
        assert_eq!(stat.indicator, "X");
    }

    #[test]
    fn missing_values_excluded_from_both_sides() {
        // (1 + 5) / 2, not (1 + 0 + 5) / 3
        let stat = mean(&view(vec!["1", "NA", "5"]), "X").unwrap();
        assert_eq!(stat.mean, 3.0);
        assert_eq!(stat.count, 2);
    }

    #[test]
    fn all_missing_is_empty_selection() {
        let err = mean(&view(vec!["NA", ""]), "X").unwrap_err();
        assert!(matches!(err, SynopsisError::EmptySelection(_)));
    }

    #[test]
    fn zero_row_view_is_empty_selection() {
        let table = Arc::new(DataTable::new(
            vec!["State".into(), "X".into()],
            vec![vec!["A".into(), "1".into()]],
            b',',
        ));
        let empty = FilteredView::apply(table, &FilterSpec::keep("State", Vec::new())).unwrap();
        let err = mean(&empty, "X").unwrap_err();
        assert!(matches!(err, SynopsisError::EmptySelection(_)));
    }

    #[test]
    fn unknown_indicator_is_an_error() {
        let err = mean(&view(vec!["1"]), "Y").unwrap_err();
        assert!(matches!(err, SynopsisError::UnknownColumn(_)));
    }

    #[test]
    fn display_mean_rounds_without_touching_the_true_value() {
        let stat = mean(&view(vec!["1", "2"]), "X").unwrap();
        assert_eq!(stat.display_mean(), 1.5);

        let stat = SummaryStat {
            indicator: "X".into(),
            mean: 2.0 / 3.0,
            count: 3,
        };
        assert_eq!(stat.display_mean(), 0.67);
        assert!(stat.mean != stat.display_mean());
    }
}
