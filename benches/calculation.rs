//! Benchmarks for column width calculation.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::cast_possible_truncation)]

use std::rc::Rc;

use colsize::{
    AutoColumnSize, AutoSizeOptions, CalculationEngine, ManualScheduler, Span, TableGrid,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Grid of `rows` x `cols` with values of varying length.
fn build_grid(rows: usize, cols: usize) -> TableGrid {
    let data = (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| "w".repeat((r * 7 + c * 3) % 40 + 1))
                .collect::<Vec<String>>()
        })
        .collect();
    TableGrid::new(data)
}

/// Measure a viewport's worth of columns, as every render does
fn bench_visible_columns(c: &mut Criterion) {
    let grid = build_grid(1_000, 100);

    c.bench_function("visible_20_cols_1000_rows", |b| {
        b.iter(|| {
            let mut engine = CalculationEngine::default();
            engine.calculate_columns_width(black_box(&grid), Some(Span::new(0, 19)), None, false)
        })
    });
}

/// Cached columns are skipped without sampling
fn bench_cached_pass(c: &mut Criterion) {
    let grid = build_grid(1_000, 100);
    let mut engine = CalculationEngine::default();
    engine.calculate_columns_width(&grid, None, None, false);

    c.bench_function("cached_100_cols", |b| {
        b.iter(|| engine.calculate_columns_width(black_box(&grid), None, None, false))
    });
}

/// Full recalculation across frames, by row count
fn bench_full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_run");

    for rows in [100usize, 1_000, 10_000] {
        let grid = Rc::new(build_grid(rows, 60));
        group.throughput(Throughput::Elements((rows * 60) as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &grid, |b, grid| {
            b.iter(|| {
                let scheduler = Rc::new(ManualScheduler::new());
                let frames: Rc<ManualScheduler> = Rc::clone(&scheduler);
                let plugin = AutoColumnSize::new(grid, frames, AutoSizeOptions::default());
                plugin.calculate_all_columns_width(None);
                scheduler.run_until_idle()
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_visible_columns,
    bench_cached_pass,
    bench_full_run,
);

criterion_main!(benches);
