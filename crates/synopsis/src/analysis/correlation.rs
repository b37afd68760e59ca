//! Pairwise Pearson correlation over numeric columns.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SynopsisError};
use crate::filter::FilteredView;

/// Square, symmetric correlation matrix over numeric columns.
///
/// `None` cells are undefined: the pair had fewer than two complete
/// observations, or one of the columns has zero variance. An undefined cell
/// never fails the rest of the matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    /// Numeric column names, indexing both axes.
    pub columns: Vec<String>,
    /// Correlation cells; `cells[i][j] == cells[j][i]` by construction.
    pub cells: Vec<Vec<Option<f64>>>,
    /// Pairwise-complete observation count for each cell.
    pub sample_sizes: Vec<Vec<usize>>,
}

impl CorrelationMatrix {
    /// Number of columns on each axis.
    pub fn size(&self) -> usize {
        self.columns.len()
    }

    /// Cell value by position.
    pub fn cell(&self, i: usize, j: usize) -> Option<f64> {
        self.cells.get(i).and_then(|row| row.get(j)).copied().flatten()
    }

    /// Cell value by column names.
    pub fn by_name(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.cell(i, j)
    }
}

/// Compute the pairwise-complete Pearson correlation matrix.
///
/// Each pair uses only rows where both columns are non-missing, so each
/// cell may cover a different effective row count. Every pair is computed
/// once and mirrored. Fails when fewer than two numeric columns exist.
pub fn correlate(view: &FilteredView, columns: &[String]) -> Result<CorrelationMatrix> {
    if columns.len() < 2 {
        return Err(SynopsisError::InsufficientColumns {
            found: columns.len(),
        });
    }

    // Materialize each column once; pairs then zip in row order.
    let mut series: Vec<Vec<Option<f64>>> = Vec::with_capacity(columns.len());
    for name in columns {
        let col = view
            .table()
            .column_index(name)
            .ok_or_else(|| SynopsisError::UnknownColumn(name.to_string()))?;
        series.push(view.numeric_values(col).collect());
    }

    let n = columns.len();
    let mut cells = vec![vec![None; n]; n];
    let mut sample_sizes = vec![vec![0usize; n]; n];

    for i in 0..n {
        let own: Vec<f64> = series[i].iter().copied().flatten().collect();
        sample_sizes[i][i] = own.len();
        // A column correlates 1 with itself by definition, unless it is
        // empty or constant, in which case the correlation is undefined.
        if !own.is_empty() && variance_numerator(&own) > 0.0 {
            cells[i][i] = Some(1.0);
        }

        for j in (i + 1)..n {
            let (xs, ys): (Vec<f64>, Vec<f64>) = series[i]
                .iter()
                .zip(series[j].iter())
                .filter_map(|(&x, &y)| Some((x?, y?)))
                .unzip();

            sample_sizes[i][j] = xs.len();
            sample_sizes[j][i] = xs.len();

            let r = pearson(&xs, &ys);
            cells[i][j] = r;
            cells[j][i] = r;
        }
    }

    Ok(CorrelationMatrix {
        columns: columns.to_vec(),
        cells,
        sample_sizes,
    })
}

/// Pearson correlation of two equal-length samples.
///
/// Undefined (`None`) for fewer than two observations or zero variance on
/// either side.
fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() < 2 {
        return None;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        numerator += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    // Floating error can push |r| marginally past 1.
    Some((numerator / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

fn variance_numerator(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean) * (v - mean)).sum()
}
