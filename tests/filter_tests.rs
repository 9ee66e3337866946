//! Multi-column value filters and the filter panel protocol.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{all_names, recorder, rendered_names, staff};
use xlgrid::callbacks::CellChange;
use xlgrid::{CellRange, GridError, Scope};

const AGE: usize = 1;
const DEPT: usize = 2;

#[test]
fn test_filters_compose_across_columns() {
    let mut grid = staff();
    assert_eq!(grid.apply_filter(DEPT, &["Eng", "Sales"]).unwrap(), 4);
    assert_eq!(rendered_names(&grid), ["Ann", "Bob", "Cid", "Eve"]);

    assert_eq!(grid.apply_filter(AGE, &["25", "40"]).unwrap(), 2);
    assert_eq!(rendered_names(&grid), ["Bob", "Cid"]);
    assert!(grid.is_column_filtered(AGE));
    assert!(grid.is_column_filtered(DEPT));
}

#[test]
fn test_reapplying_a_filter_is_idempotent() {
    let mut grid = staff();
    grid.apply_filter(DEPT, &["Sales"]).unwrap();
    let first = rendered_names(&grid);
    grid.apply_filter(DEPT, &["Sales"]).unwrap();
    assert_eq!(rendered_names(&grid), first);
    assert_eq!(first, ["Bob", "Eve"]);
}

#[test]
fn test_selecting_every_value_deactivates() {
    let mut grid = staff();
    grid.apply_filter(DEPT, &["Eng", "Sales", "Ops"]).unwrap();
    assert!(!grid.is_column_filtered(DEPT));
    assert_eq!(grid.row_count(Scope::Rendered), 5);
}

#[test]
fn test_filter_values_match_case_insensitively() {
    let mut grid = staff();
    grid.apply_filter(DEPT, &["eng"]).unwrap();
    assert_eq!(rendered_names(&grid), ["Ann", "Cid"]);
}

#[test]
fn test_clear_all_restores_every_row() {
    let mut grid = staff();
    grid.apply_filter(DEPT, &["Ops"]).unwrap();
    grid.apply_filter(AGE, &["25"]).unwrap();
    assert!(grid.clear_all_filters());
    assert_eq!(grid.row_count(Scope::Rendered), 5);
    assert!(!grid.is_column_filtered(AGE));
    assert!(!grid.is_column_filtered(DEPT));
}

#[test]
fn test_unfilterable_column_is_refused() {
    let mut grid = staff();
    assert!(matches!(
        grid.apply_filter(0, &["Ann"]),
        Err(GridError::ColumnNotFilterable(0))
    ));
    assert_eq!(grid.row_count(Scope::Rendered), 5);
}

// ============================================================================
// Edits under an active filter
// ============================================================================

#[test]
fn test_rendered_edit_drops_membership_but_keeps_row() {
    let mut grid = staff();
    grid.apply_filter(DEPT, &["Eng"]).unwrap();
    let log = recorder::<CellChange>();
    let sink = log.clone();
    grid.callbacks.after_change_cell_data =
        Some(Box::new(move |change: &CellChange| sink.borrow_mut().push(change.clone())));

    assert!(grid.update_cell_at(0, DEPT, "Ops", Scope::Rendered, false));
    assert_eq!(rendered_names(&grid), ["Ann", "Cid"]);
    assert!(log.borrow()[0].filter_changed);

    // The next filter pass drops it.
    grid.apply_filter(DEPT, &["Eng"]).unwrap();
    assert_eq!(rendered_names(&grid), ["Cid"]);
}

#[test]
fn test_all_scope_edit_reincludes_row_in_order() {
    let mut grid = staff();
    grid.apply_filter(DEPT, &["Eng"]).unwrap();
    assert_eq!(rendered_names(&grid), ["Ann", "Cid"]);

    assert!(grid.update_cell_at(1, DEPT, "Eng", Scope::All, false));
    assert_eq!(rendered_names(&grid), ["Ann", "Bob", "Cid"]);
    assert!(grid.update_cell_at(4, DEPT, "Eng", Scope::All, false));
    assert_eq!(rendered_names(&grid), ["Ann", "Bob", "Cid", "Eve"]);
}

#[test]
fn test_reincluded_row_keeps_open_edit_and_selection_on_their_rows() {
    let mut grid = staff();
    grid.apply_filter(DEPT, &["Eng"]).unwrap();
    assert!(grid.start_cell_edit(1, 0));
    grid.set_edit_value("Cy");
    assert_eq!(grid.selection(), Some(CellRange::cell(1, 0)));

    // Bob lands at rendered 1 and pushes Cid down.
    assert!(grid.update_cell_at(1, DEPT, "Eng", Scope::All, false));
    assert_eq!(rendered_names(&grid), ["Ann", "Bob", "Cid"]);
    assert_eq!(grid.edit_session().map(|s| (s.row, s.col)), Some((2, 0)));
    assert_eq!(grid.selection(), Some(CellRange::cell(2, 0)));

    assert!(grid.end_cell_edit());
    assert_eq!(all_names(&grid), ["Ann", "Bob", "Cy", "Dee", "Eve"]);
}

#[test]
fn test_reinclusion_after_the_edit_row_leaves_it_alone() {
    let mut grid = staff();
    grid.apply_filter(DEPT, &["Eng"]).unwrap();
    assert!(grid.start_cell_edit(0, 0));
    assert!(grid.update_cell_at(4, DEPT, "Eng", Scope::All, false));
    assert_eq!(grid.edit_session().map(|s| s.row), Some(0));
    assert_eq!(grid.selection(), Some(CellRange::cell(0, 0)));
}

#[test]
fn test_all_scope_edit_needs_every_active_filter() {
    let mut grid = staff();
    grid.apply_filter(DEPT, &["Eng"]).unwrap();
    grid.apply_filter(AGE, &["30"]).unwrap();
    assert_eq!(rendered_names(&grid), ["Ann"]);

    // Bob now matches Dept but still fails Age.
    grid.update_cell_at(1, DEPT, "Eng", Scope::All, false);
    assert_eq!(rendered_names(&grid), ["Ann"]);
    grid.update_cell_at(1, AGE, "30", Scope::All, false);
    assert_eq!(rendered_names(&grid), ["Ann", "Bob"]);
}

// ============================================================================
// Panel protocol
// ============================================================================

#[test]
fn test_panel_cancel_leaves_filter_alone() {
    let mut grid = staff();
    grid.open_filter(DEPT).unwrap();
    grid.filter_panel_mut().unwrap().toggle_item("Eng");
    assert!(grid.cancel_filter());
    assert!(grid.filter_panel().is_none());
    assert_eq!(grid.row_count(Scope::Rendered), 5);
    assert!(!grid.is_column_filtered(DEPT));
}

#[test]
fn test_panel_search_and_select_all() {
    let mut grid = staff();
    let panel = grid.open_filter(DEPT).unwrap();
    assert!(panel.select_all_checked());

    let panel = grid.filter_panel_mut().unwrap();
    panel.toggle_select_all();
    assert!(panel.checked_values().is_empty());

    // Searching checks every match.
    panel.set_search("S");
    let shown: Vec<_> = panel
        .visible_items()
        .map(|i| (i.value.as_str(), i.checked))
        .collect();
    assert_eq!(shown, [("Ops", true), ("Sales", true)]);
    assert_eq!(panel.include_current(), Some(false));

    panel.toggle_item("Ops");
    panel.toggle_item("Eng");
    assert_eq!(panel.checked_values(), ["Sales"]);
    assert!(grid.commit_filter());
    assert_eq!(rendered_names(&grid), ["Bob", "Eve"]);
}

#[test]
fn test_panel_search_can_add_to_current_selection() {
    let mut grid = staff();
    grid.apply_filter(DEPT, &["Eng"]).unwrap();
    grid.open_filter(DEPT).unwrap();
    let panel = grid.filter_panel_mut().unwrap();
    panel.set_search("ops");
    panel.toggle_include_current();
    assert!(grid.commit_filter());
    assert_eq!(rendered_names(&grid), ["Ann", "Cid", "Dee"]);
}

#[test]
fn test_panel_reopen_shows_previous_selection() {
    let mut grid = staff();
    grid.apply_filter(AGE, &["25"]).unwrap();
    let panel = grid.open_filter(AGE).unwrap();
    let checked: Vec<_> = panel
        .visible_items()
        .map(|i| (i.value.as_str(), i.checked))
        .collect();
    assert_eq!(
        checked,
        [("25", true), ("30", false), ("35", false), ("40", false)]
    );
    assert!(panel.clear_all_enabled());
}

#[test]
fn test_filter_commit_clamps_selection() {
    let mut grid = staff();
    grid.select_cells(CellRange::new(3, 0, 4, 3));
    grid.apply_filter(DEPT, &["Eng"]).unwrap();
    let selection = grid.selection().unwrap();
    assert!(selection.end_row < grid.row_count(Scope::Rendered));
}
