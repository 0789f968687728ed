//! Benchmarks for pointer <-> cell mapping.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::expect_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use xlgrid::layout::{SheetLayout, Viewport};
use xlgrid::{GridConfig, GridView, MemoryModel, SheetModel};

/// Model with irregular column widths and row heights in the first 2000
/// columns/rows.
fn irregular_model() -> MemoryModel {
    let mut model = MemoryModel::with_default_sizes(64.0, 20.0);
    for i in 1..=2000u32 {
        model.set_columns_width(0, i, i, f64::from(40 + i % 7 * 15));
        model.set_rows_height(0, i, i, f64::from(16 + i % 5 * 4));
    }
    model.set_frozen_rows_count(0, 2);
    model.set_frozen_columns_count(0, 1);
    model.clear_calls();
    model
}

/// Mapping at increasing scroll depths, with a warm offset cache
fn bench_pixel_to_cell(c: &mut Criterion) {
    let config = GridConfig::default();
    let model = irregular_model();
    let mut group = c.benchmark_group("pixel_to_cell");

    for scroll_top in [0.0, 50_000.0, 2_000_000.0, 20_000_000.0] {
        let mut layout = SheetLayout::from_model(&model, &config);
        let mut viewport = Viewport::new();
        viewport.set_scroll(10_000.0, scroll_top);
        viewport.pixel_to_cell(&mut layout, &model, 400.0, 300.0);

        group.bench_with_input(
            BenchmarkId::from_parameter(scroll_top),
            &scroll_top,
            |b, _| {
                b.iter(|| {
                    viewport.pixel_to_cell(
                        &mut layout,
                        &model,
                        black_box(400.0),
                        black_box(300.0),
                    )
                })
            },
        );
    }
    group.finish();
}

/// Cold lookup deep into the sheet, which resolves every offset on the way
fn bench_cold_deep_lookup(c: &mut Criterion) {
    let config = GridConfig::default();
    let model = irregular_model();
    let mut viewport = Viewport::new();
    viewport.set_scroll(0.0, 5_000_000.0);

    c.bench_function("pixel_to_cell_cold", |b| {
        b.iter(|| {
            let mut layout = SheetLayout::from_model(&model, &config);
            viewport.pixel_to_cell(&mut layout, &model, black_box(400.0), black_box(300.0))
        })
    });
}

/// Full drag step: hit test, model update and frame build
fn bench_drag_step(c: &mut Criterion) {
    let mut grid =
        GridView::new(irregular_model(), GridConfig::default()).expect("default config is valid");
    grid.on_pointer_down(200.0, 60.0, false);
    let mut x = 200.0;

    c.bench_function("drag_step", |b| {
        b.iter(|| {
            x = if x > 700.0 { 200.0 } else { x + 7.0 };
            let effects = grid.on_pointer_move(black_box(x), black_box(240.0));
            let frame = grid.frame();
            (effects, frame)
        })
    });
}

criterion_group!(
    benches,
    bench_pixel_to_cell,
    bench_cold_deep_lookup,
    bench_drag_step
);
criterion_main!(benches);
