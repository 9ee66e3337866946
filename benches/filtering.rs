//! Benchmarks for filtering, scrolling and row insertion.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::cast_possible_truncation
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use xlgrid::{ChoiceOption, Column, ColumnKind, Grid, GridConfig, Scope};

const DEPTS: [&str; 4] = ["Eng", "Sales", "Ops", "Legal"];

fn columns() -> Vec<Column> {
    vec![
        Column::new("Name", ColumnKind::Text, 120.0),
        Column::new("Age", ColumnKind::Integer, 60.0)
            .filterable(true)
            .with_summary(true),
        Column::new(
            "Dept",
            ColumnKind::Choice(DEPTS.iter().map(|d| ChoiceOption::new(*d, *d)).collect()),
            80.0,
        )
        .filterable(true),
        Column::new("Salary", ColumnKind::Float, 90.0).with_summary(true),
    ]
}

fn row(i: usize) -> [String; 4] {
    [
        format!("person {i}"),
        (20 + i % 45).to_string(),
        DEPTS[i % DEPTS.len()].to_string(),
        format!("{}.50", 30_000 + (i * 37) % 90_000),
    ]
}

/// A grid with `rows` generated rows.
fn grid(rows: usize) -> Grid {
    let mut grid = Grid::new(GridConfig::with_viewport(800.0, 600.0)).expect("config");
    for column in columns() {
        grid.add_column(column).expect("column");
    }
    for i in 0..rows {
        grid.add_row(&row(i));
    }
    grid
}

/// Benchmark inserting rows one by one (each insert re-renders the window)
fn bench_add_rows(c: &mut Criterion) {
    let rows: Vec<[String; 4]> = (0..10_000).map(row).collect();

    let mut group = c.benchmark_group("add_rows");
    group.throughput(Throughput::Elements(rows.len() as u64));
    group.bench_function("add_10000", |b| {
        b.iter(|| {
            let mut grid = Grid::new(GridConfig::default()).expect("config");
            for column in columns() {
                grid.add_column(column).expect("column");
            }
            for r in &rows {
                grid.add_row(black_box(r));
            }
            grid
        })
    });
    group.finish();
}

/// Compare filter commits across dataset sizes
fn bench_apply_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_filter");

    for size in [1_000, 10_000, 100_000] {
        let mut grid = grid(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("dept", size), &size, |b, _| {
            b.iter(|| {
                grid.apply_filter(2, black_box(&["Eng", "Ops"])).unwrap();
                grid.clear_all_filters();
            })
        });
    }

    group.finish();
}

/// Benchmark scrolling a large grid row by row
fn bench_scroll(c: &mut Criterion) {
    let mut grid = grid(100_000);
    let rows = grid.row_count(Scope::Rendered);
    let row_height = grid.config().row_height;

    c.bench_function("scroll_100000", |b| {
        let mut top = 0.0;
        b.iter(|| {
            top = (top + row_height) % (rows as f64 * row_height);
            grid.scroll_to(black_box(top))
        })
    });
}

/// Benchmark opening a filter panel over every possible value
fn bench_open_filter(c: &mut Criterion) {
    let mut grid = grid(100_000);

    c.bench_function("open_filter_age_100000", |b| {
        b.iter(|| {
            grid.open_filter(black_box(1)).unwrap();
            grid.cancel_filter();
        })
    });
}

criterion_group!(
    benches,
    bench_add_rows,
    bench_apply_filter,
    bench_scroll,
    bench_open_filter,
);

criterion_main!(benches);
