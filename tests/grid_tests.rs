//! End-to-end tests on the in-memory table grid
//!
//! A `TableGrid` renders a viewport over its column layout; the plugin sizes
//! what is visible, and the grid relayouts with the resolved widths.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::rc::Rc;

use colsize::{
    AutoColumnSize, AutoSizeOptions, Delimiter, GridHost, ManualScheduler, TableGrid,
    ViewportQuery, DEFAULT_COL_WIDTH,
};

/// 20 display columns at 7px plus 9px padding.
const WIDE: f32 = 149.0;

fn wide_grid(cols: usize) -> Rc<TableGrid> {
    let rows = vec![vec!["x".repeat(20); cols]; 3];
    Rc::new(TableGrid::new(rows))
}

fn attach(grid: &Rc<TableGrid>, options: AutoSizeOptions) -> (AutoColumnSize, Rc<ManualScheduler>) {
    let scheduler = Rc::new(ManualScheduler::new());
    let frames: Rc<ManualScheduler> = Rc::clone(&scheduler);
    (AutoColumnSize::new(grid, frames, options), scheduler)
}

fn relayout(grid: &TableGrid, plugin: &AutoColumnSize) {
    grid.relayout(|col| plugin.on_modify_column_width(col, None));
}

#[test]
fn test_render_measures_viewport_then_offset_measures_more() {
    let grid = wide_grid(12);
    let (plugin, _scheduler) = attach(&grid, AutoSizeOptions::default());

    grid.render(120.0);
    assert_eq!(grid.first_visible_column(), Some(0));
    assert_eq!(grid.last_visible_column(), Some(2));

    plugin.on_before_render(false);
    assert_eq!(plugin.widths(), vec![(0, WIDE), (1, WIDE), (2, WIDE)]);

    relayout(&grid, &plugin);
    let layout = grid.layout();
    assert_eq!(layout.col_width(0), WIDE);
    assert_eq!(layout.col_width(3), DEFAULT_COL_WIDTH);
    assert_eq!(grid.last_visible_column(), Some(0));

    grid.set_viewport_offset(3.0 * WIDE);
    assert_eq!(grid.first_visible_column(), Some(3));
    assert_eq!(grid.last_visible_column(), Some(5));

    plugin.on_before_render(false);
    assert_eq!(plugin.widths().len(), 6);
    assert!(plugin.needs_recalculation());
}

#[test]
fn test_full_run_then_relayout() {
    let grid = wide_grid(45);
    let (plugin, scheduler) = attach(&grid, AutoSizeOptions::default());

    plugin.calculate_all_columns_width(None);
    assert_eq!(scheduler.run_until_idle(), 3);
    assert_eq!(grid.layout_adjustments(), 1);

    relayout(&grid, &plugin);
    assert_eq!(grid.layout().total_width(), 45.0 * WIDE);
}

#[test]
fn test_user_width_wins_when_wider() {
    let grid = wide_grid(2);
    grid.set_width_override(1, Some(300.0));
    let (plugin, _scheduler) = attach(&grid, AutoSizeOptions::default());

    plugin.calculate_columns_width(None, None, false);
    assert_eq!(plugin.cached_width(1), None, "overridden column skipped");

    grid.relayout(|col| plugin.on_modify_column_width(col, grid.user_width_override(col)));
    assert_eq!(grid.layout().col_width(0), WIDE);
    assert_eq!(grid.layout().col_width(1), 300.0);
}

#[test]
fn test_csv_headers_widen_columns() {
    let data = b"Id,A rather long column title\n1,x\n2,yy";
    let grid = Rc::new(TableGrid::from_delimited(data, Delimiter::Comma, true).unwrap());
    assert_eq!(grid.count_rows(), 2);

    let (plain, _s1) = attach(&grid, AutoSizeOptions::default());
    let (headed, _s2) = attach(
        &grid,
        AutoSizeOptions {
            use_headers: true,
            ..AutoSizeOptions::default()
        },
    );
    plain.calculate_columns_width(None, None, false);
    headed.calculate_columns_width(None, None, false);

    // "yy" vs the 26-character title
    assert_eq!(plain.cached_width(1), Some(2.0 * 7.0 + 9.0));
    assert_eq!(headed.cached_width(1), Some(26.0 * 7.0 + 9.0));
}

#[test]
fn test_after_load_on_table_grid() {
    let grid = wide_grid(4);
    let (plugin, scheduler) = attach(&grid, AutoSizeOptions::default());
    grid.render(400.0);
    plugin.on_before_render(false);

    plugin.on_after_load_data();
    scheduler.run_until_idle();
    assert_eq!(grid.layout_adjustments(), 1);
    assert!(!plugin.needs_recalculation());
}
