//! Analysis pipeline performance benchmarks.
//!
//! Measures end-to-end open/render performance plus the individual
//! statistical computations over generated survey-style tables.

use std::io::Write;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::prelude::*;
use tempfile::NamedTempFile;

use synopsis::analysis;
use synopsis::{Dashboard, DataTable, FilteredView, Selection};

const STATES: [&str; 8] = [
    "Kerala",
    "Goa",
    "Punjab",
    "Assam",
    "Bihar",
    "Sikkim",
    "Odisha",
    "Manipur",
];

/// Generate a survey-style CSV: one State column plus numeric indicators.
fn generate_survey_csv(rows: usize, indicators: usize) -> String {
    let mut rng = StdRng::seed_from_u64(42);
    let mut data = String::new();

    data.push_str("State");
    for i in 0..indicators {
        data.push_str(&format!(",indicator_{i}"));
    }
    data.push('\n');

    for row in 0..rows {
        data.push_str(STATES[row % STATES.len()]);
        for _ in 0..indicators {
            if rng.gen_bool(0.05) {
                data.push_str(",NA");
            } else {
                data.push_str(&format!(",{:.2}", rng.gen_range(0.0..100.0)));
            }
        }
        data.push('\n');
    }

    data
}

fn generate_view(rows: usize, indicators: usize) -> (FilteredView, Vec<String>) {
    let mut rng = StdRng::seed_from_u64(7);
    let mut headers = vec!["State".to_string()];
    headers.extend((0..indicators).map(|i| format!("indicator_{i}")));

    let table_rows = (0..rows)
        .map(|row| {
            let mut cells = vec![STATES[row % STATES.len()].to_string()];
            cells.extend((0..indicators).map(|_| format!("{:.4}", rng.gen_range(0.0..100.0))));
            cells
        })
        .collect();

    let table = Arc::new(DataTable::new(headers.clone(), table_rows, b','));
    (FilteredView::all(table), headers[1..].to_vec())
}

fn bench_open_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("open_and_render");

    for rows in [100, 1_000, 10_000] {
        let data = generate_survey_csv(rows, 8);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter_with_setup(
                || {
                    let mut temp = NamedTempFile::new().unwrap();
                    temp.write_all(data.as_bytes()).unwrap();
                    temp
                },
                |temp| {
                    let dashboard = Dashboard::new();
                    let session = dashboard.open(temp.path()).unwrap();
                    let selection = session.default_selection().unwrap();
                    black_box(session.render(&selection).unwrap());
                },
            );
        });
    }

    group.finish();
}

fn bench_cached_render(c: &mut Criterion) {
    let data = generate_survey_csv(10_000, 8);
    let mut temp = NamedTempFile::new().unwrap();
    temp.write_all(data.as_bytes()).unwrap();

    let dashboard = Dashboard::new();
    let session = dashboard.open(temp.path()).unwrap();
    let selection = Selection::indicator("indicator_0")
        .with_groups(["Kerala".to_string(), "Goa".to_string()]);

    c.bench_function("cached_render_filtered", |b| {
        b.iter(|| black_box(session.render(&selection).unwrap()));
    });
}

fn bench_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics");

    for rows in [1_000, 10_000] {
        let (view, columns) = generate_view(rows, 8);

        group.bench_with_input(BenchmarkId::new("mean", rows), &view, |b, view| {
            b.iter(|| black_box(analysis::mean(view, "indicator_0").unwrap()));
        });

        group.bench_with_input(
            BenchmarkId::new("correlate_8_columns", rows),
            &(&view, &columns),
            |b, (view, columns)| {
                b.iter(|| black_box(analysis::correlate(view, columns).unwrap()));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("group_aggregate", rows),
            &view,
            |b, view| {
                b.iter(|| {
                    black_box(
                        analysis::aggregate(view, "indicator_0", Some("State"), 10).unwrap(),
                    )
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("histogram", rows), &view, |b, view| {
            b.iter(|| black_box(analysis::aggregate(view, "indicator_0", None, 10).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_open_and_render,
    bench_cached_render,
    bench_statistics
);
criterion_main!(benches);
