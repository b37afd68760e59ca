//! Show command - render the dashboard panels for one selection.

use std::path::PathBuf;

use colored::Colorize;

use synopsis::{
    ChartAggregate, CorrelationMatrix, Dashboard, DashboardConfig, DashboardView, Panel, Preview,
    Selection,
};

pub fn run(
    file: PathBuf,
    indicator: Option<String>,
    groups: Vec<String>,
    bins: usize,
    json: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let config = DashboardConfig {
        histogram_bins: bins,
        ..DashboardConfig::default()
    };
    let dashboard = Dashboard::with_config(config);
    let session = dashboard.open(&file)?;

    let mut selection = match indicator {
        Some(name) => Selection::indicator(name),
        None => session
            .default_selection()
            .ok_or("no numeric column to select")?,
    };
    if !groups.is_empty() {
        selection = selection.with_groups(groups);
    }

    let view = session.render(&selection)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Dataset".cyan().bold(),
        session.source().file.white()
    );
    println!(
        "{} of {} rows selected, indicator {}",
        view.row_count.to_string().white().bold(),
        session.source().row_count,
        view.indicator.white().bold()
    );

    if verbose {
        println!();
        println!("{}", "Columns:".yellow().bold());
        for col in &session.profile().columns {
            println!(
                "  {:24} {:12} {} missing",
                col.name,
                format!("{:?}", col.class).to_lowercase(),
                col.missing_count
            );
        }
    }

    print_summary(&view);
    print_preview(&view.preview);
    print_chart(&view);
    print_correlation(&view);

    Ok(())
}

fn print_summary(view: &DashboardView) {
    println!();
    println!("{}", "Average value".yellow().bold());
    match &view.summary {
        Panel::Ready(stat) => println!(
            "  {} = {} (over {} values)",
            stat.indicator,
            format!("{:.2}", stat.display_mean()).white().bold(),
            stat.count
        ),
        Panel::Unavailable { reason } => println!("  {}", reason.yellow()),
    }
}

fn print_preview(preview: &Preview) {
    println!();
    println!("{}", "Data preview".yellow().bold());

    if preview.rows.is_empty() {
        println!("  (no rows)");
        return;
    }

    let widths: Vec<usize> = preview
        .headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            preview
                .rows
                .iter()
                .map(|row| row.get(i).map_or(0, |cell| cell.len()))
                .chain(std::iter::once(header.len()))
                .max()
                .unwrap_or(0)
                .min(18)
        })
        .collect();

    let header_line: Vec<String> = preview
        .headers
        .iter()
        .zip(&widths)
        .map(|(header, &w)| format!("{:w$}", truncate(header, w)))
        .collect();
    println!("  {}", header_line.join("  ").bold());

    for row in &preview.rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:w$}", truncate(cell, w)))
            .collect();
        println!("  {}", line.join("  "));
    }
}

fn print_chart(view: &DashboardView) {
    println!();
    match &view.chart {
        Panel::Ready(ChartAggregate::Grouped { indicator, groups }) => {
            println!("{}", format!("{indicator} by group").yellow().bold());

            let label_width = groups.iter().map(|g| g.group.len()).max().unwrap_or(0);
            let max_mean = groups
                .iter()
                .map(|g| g.mean.abs())
                .fold(f64::NEG_INFINITY, f64::max);

            for group in groups {
                println!(
                    "  {:label_width$}  {} {:.2}",
                    group.group,
                    bar(group.mean.abs(), max_mean, 30).cyan(),
                    group.mean
                );
            }
        }
        Panel::Ready(ChartAggregate::Binned { indicator, bins }) => {
            println!("{}", format!("Distribution of {indicator}").yellow().bold());

            let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0);
            for bin in bins {
                println!(
                    "  {:>10.2} .. {:>10.2}  {} {}",
                    bin.lower,
                    bin.upper,
                    bar(bin.count as f64, max_count as f64, 30).cyan(),
                    bin.count
                );
            }
        }
        Panel::Unavailable { reason } => {
            println!("{}", "Chart".yellow().bold());
            println!("  {}", reason.yellow());
        }
    }
}

fn print_correlation(view: &DashboardView) {
    println!();
    println!("{}", "Correlation matrix".yellow().bold());

    match &view.correlation {
        Panel::Ready(matrix) => print_matrix(matrix),
        Panel::Unavailable { reason } => println!("  {}", reason.yellow()),
    }
}

fn print_matrix(matrix: &CorrelationMatrix) {
    let name_width = 12usize;
    let cell_width = 7usize;

    let header: Vec<String> = matrix
        .columns
        .iter()
        .map(|name| format!("{:>cell_width$}", truncate(name, cell_width)))
        .collect();
    println!("  {:name_width$} {}", "", header.join(" ").bold());

    for (i, name) in matrix.columns.iter().enumerate() {
        let cells: Vec<String> = (0..matrix.size())
            .map(|j| match matrix.cell(i, j) {
                Some(r) => format!("{r:>cell_width$.2}"),
                None => format!("{:>cell_width$}", "n/a"),
            })
            .collect();
        println!(
            "  {:name_width$} {}",
            truncate(name, name_width),
            cells.join(" ")
        );
    }
}

/// Scale a value against the observed maximum into a fixed-width bar.
fn bar(value: f64, max: f64, width: usize) -> String {
    if !(max > 0.0) {
        return String::new();
    }
    let len = ((value / max) * width as f64).round() as usize;
    "#".repeat(len.min(width))
}

fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        text.to_string()
    } else if max > 1 {
        format!("{}…", &text[..floor_char_boundary(text, max - 1)])
    } else {
        text.chars().take(max).collect()
    }
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_scales_to_width() {
        assert_eq!(bar(10.0, 10.0, 30).len(), 30);
        assert_eq!(bar(5.0, 10.0, 30).len(), 15);
        assert_eq!(bar(0.0, 10.0, 30), "");
        assert_eq!(bar(1.0, 0.0, 30), "");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 18), "short");
        assert_eq!(truncate("a-very-long-column-name", 8), "a-very-…");
        // 4 bytes floors to the boundary after "Ár" (3 bytes)
        assert_eq!(truncate("Árvíztűrő", 4), "Ár…");
    }
}
