//! Row virtualization, scrolling and render frames.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{numbered, recorder, staff};
use xlgrid::render::{RecordingBackend, RenderFrame};
use xlgrid::{CellRange, Scope};

/// 200px viewport, 24px rows, overscan 7: ceil(200/24) + 7 rows.
const WINDOW: usize = 16;

#[test]
fn test_only_the_window_is_rendered() {
    let mut grid = numbered(1000);
    let frame = grid.render();
    assert_eq!(frame.window, 0..WINDOW);
    assert_eq!(frame.row_count(), WINDOW);
    assert_eq!(frame.content_height, 24_000.0);
    assert_eq!(frame.rows[0].cells[0].text, "r0");
}

#[test]
fn test_scroll_renders_once_per_level() {
    let mut grid = numbered(100);
    let renders = grid.render_count();

    // Same first row: nothing to do.
    assert!(!grid.scroll_to(10.0));
    assert_eq!(grid.render_count(), renders);

    assert!(grid.scroll_to(100.0));
    assert_eq!(grid.render_count(), renders + 1);
    let frame = grid.frame().unwrap();
    assert_eq!(frame.window, 4..4 + WINDOW);
    assert_eq!(frame.rows[0].top, 96.0);

    assert!(!grid.scroll_to(110.0));
    assert_eq!(grid.render_count(), renders + 1);
}

#[test]
fn test_scroll_clamps_to_content() {
    let mut grid = numbered(100);
    grid.scroll_to(1.0e9);
    assert_eq!(grid.viewport().scroll_top, 2400.0 - 200.0);
    let frame = grid.frame().unwrap();
    assert_eq!(frame.window.end, 100);

    grid.scroll_to(-50.0);
    assert_eq!(grid.viewport().scroll_top, 0.0);
}

#[test]
fn test_short_grids_render_every_row() {
    let mut grid = numbered(3);
    assert_eq!(grid.render().window, 0..3);
    grid.clear_data();
    assert_eq!(grid.render().row_count(), 0);
}

#[test]
fn test_filtering_shrinks_the_scroll_range() {
    let mut grid = staff();
    grid.apply_filter(2, &["Ops"]).unwrap();
    let frame = grid.frame().unwrap();
    assert_eq!(frame.window, 0..1);
    assert_eq!(frame.content_height, 24.0);
    assert!(frame.headers[2].filtered);
    assert!(!frame.headers[1].filtered);
    assert!(frame.headers[1].filterable);
    assert!(!frame.headers[0].filterable);
}

#[test]
fn test_keyboard_selection_scrolls_into_view() {
    let mut grid = numbered(100);
    grid.select_cells(CellRange::cell(20, 0));
    let top = grid.viewport().scroll_top;
    assert!(top > 0.0);
    assert!(20.0 * 24.0 >= top);
    assert!(21.0 * 24.0 <= top + 200.0);
}

#[test]
fn test_selection_box_clipped_to_window() {
    let mut grid = numbered(100);
    grid.select_cells(CellRange::new(0, 0, 99, 0));
    let frame = grid.frame().unwrap().clone();
    let rect = frame.selection.unwrap();
    let window_rows = frame.window.len() as f64;
    assert!(rect.h <= window_rows * 24.0);
    assert_eq!(rect.y, frame.window.start as f64 * 24.0);
}

#[test]
fn test_render_callbacks_fire_per_frame_and_cell() {
    let mut grid = staff();
    let frames = recorder::<usize>();
    let cells = recorder::<(usize, usize)>();
    let frame_sink = frames.clone();
    let cell_sink = cells.clone();
    grid.callbacks.after_render_grid = Some(Box::new(move |frame: &RenderFrame| {
        frame_sink.borrow_mut().push(frame.row_count());
    }));
    grid.callbacks.after_render_cell = Some(Box::new(move |cell: &xlgrid::render::CellRenderData| {
        cell_sink.borrow_mut().push((cell.row, cell.col));
    }));

    grid.render();
    assert_eq!(*frames.borrow(), [5]);
    assert_eq!(cells.borrow().len(), 5 * 4);
    assert_eq!(cells.borrow()[5], (1, 1));
}

#[test]
fn test_numbers_display_grouped() {
    let mut grid = staff();
    grid.update_cell_at(0, 1, "1234567", Scope::All, false);
    let frame = grid.render();
    assert_eq!(frame.rows[0].cells[1].text, "1,234,567");
    assert!(frame.rows[0].cells[1].numeric);
    assert_eq!(grid.text_at(Scope::All, 0, 1), Some("1234567"));
}

#[test]
fn test_resize_column_moves_later_columns() {
    let mut grid = staff();
    let widths = recorder::<(usize, f64)>();
    let sink = widths.clone();
    grid.callbacks.after_resize_column =
        Some(Box::new(move |col: usize, width: f64| sink.borrow_mut().push((col, width))));

    assert!(grid.resize_column(0, 200.0));
    assert!(!grid.resize_column(0, -5.0));
    assert!(!grid.resize_column(9, 50.0));
    let frame = grid.frame().unwrap();
    assert_eq!(frame.headers[1].left, 200.0);
    assert_eq!(*widths.borrow(), [(0, 200.0)]);
}

#[test]
fn test_backend_follows_renders_and_auto_scroll() {
    let mut grid = numbered(100);
    let backend = RecordingBackend::new();
    grid.set_backend(Box::new(backend.clone()));

    grid.scroll_to(100.0);
    assert_eq!(backend.paint_count(), 1);
    assert_eq!(backend.last_frame().unwrap().window.start, 4);

    grid.select_cells(CellRange::cell(50, 0));
    assert_eq!(backend.paint_count(), 2);
    assert_eq!(backend.scroll_top(), grid.viewport().scroll_top);
    assert!(backend.scroll_top() > 100.0);
}
