//! Selection, keyboard, editing, clipboard, focus and row drag, driven the
//! way the DOM layer drives them.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{all_names, recorder, rendered_names, staff, staff_columns};
use xlgrid::drag::RowMove;
use xlgrid::viewer::events::KeyOutcome;
use xlgrid::{CellRange, GridConfig, Scope, XlGrid};

fn staff_view() -> XlGrid {
    let mut view = XlGrid::new_test(GridConfig::with_viewport(600.0, 200.0)).unwrap();
    let grid = view.grid_mut();
    for column in staff_columns() {
        grid.add_column(column).unwrap();
    }
    for row in [
        ["Ann", "30", "Eng", "01-15-2020"],
        ["Bob", "25", "Sales", "03-01-2021"],
        ["Cid", "40", "Eng", "07-04-2019"],
    ] {
        assert!(grid.add_row(&row));
    }
    view
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_pointer_drag_selects_range() {
    let mut grid = staff();
    let log = recorder::<CellRange>();
    let sink = log.clone();
    grid.callbacks.after_select_cells =
        Some(Box::new(move |range: CellRange| sink.borrow_mut().push(range)));

    assert!(grid.pointer_down(1, 1));
    assert!(grid.is_selecting());
    grid.pointer_move(3, 2);
    grid.pointer_up();
    assert!(!grid.is_selecting());

    // Moves after pointer-up do nothing.
    assert!(!grid.pointer_move(4, 3));
    assert_eq!(grid.selection(), Some(CellRange::new(1, 1, 3, 2)));
    assert_eq!(log.borrow().last(), Some(&CellRange::new(1, 1, 3, 2)));
}

#[test]
fn test_selection_clamps_to_rendered_bounds() {
    let mut grid = staff();
    grid.select_cells(CellRange::new(2, 1, 50, 50));
    assert_eq!(grid.selection(), Some(CellRange::new(2, 1, 4, 3)));
    grid.select_all();
    assert_eq!(grid.selection(), Some(CellRange::new(0, 0, 4, 3)));
}

#[test]
fn test_arrow_keys_move_and_extend() {
    let mut view = staff_view();
    view.grid_mut().select_cells(CellRange::cell(0, 0));

    assert_eq!(view.key_down("ArrowDown", false, false), KeyOutcome::Handled);
    assert_eq!(view.grid().selection(), Some(CellRange::cell(1, 0)));

    view.key_down("ArrowRight", false, true);
    view.key_down("ArrowDown", false, true);
    assert_eq!(view.grid().selection(), Some(CellRange::new(1, 0, 2, 1)));

    // Edges clamp.
    view.key_down("ArrowUp", false, false);
    view.key_down("ArrowUp", false, false);
    view.key_down("ArrowUp", false, false);
    assert_eq!(view.grid().selection(), Some(CellRange::cell(0, 0)));
}

#[test]
fn test_keys_without_selection_are_ignored() {
    let mut view = staff_view();
    assert_eq!(view.key_down("ArrowDown", false, false), KeyOutcome::Ignored);
    assert_eq!(view.key_down("x", false, false), KeyOutcome::Ignored);
    assert_eq!(view.key_down("Shift", false, true), KeyOutcome::Ignored);
}

// ============================================================================
// Editing
// ============================================================================

#[test]
fn test_typing_opens_seeded_editor_and_enter_commits() {
    let mut view = staff_view();
    view.grid_mut().select_cells(CellRange::cell(1, 1));

    assert_eq!(view.key_down("4", false, false), KeyOutcome::Handled);
    let session = view.grid().edit_session().unwrap();
    assert_eq!((session.row, session.col), (1, 1));
    assert_eq!(session.value, "4");

    view.grid_mut().set_edit_value("45");
    assert_eq!(view.key_down("Enter", false, false), KeyOutcome::Handled);
    assert!(!view.grid().is_editing());
    assert_eq!(view.text_at(1, 1, "all").as_deref(), Some("45"));
    assert_eq!(view.grid().selection(), Some(CellRange::cell(2, 1)));
}

#[test]
fn test_escape_discards_edit() {
    let mut view = staff_view();
    view.grid_mut().select_cells(CellRange::cell(0, 0));
    view.key_down("F2", false, false);
    assert_eq!(view.grid().edit_session().unwrap().value, "Ann");
    view.grid_mut().set_edit_value("Zed");
    view.key_down("Escape", false, false);
    assert!(!view.grid().is_editing());
    assert_eq!(view.text_at(0, 0, "rendered").as_deref(), Some("Ann"));
}

#[test]
fn test_tab_commits_and_moves_right() {
    let mut view = staff_view();
    view.grid_mut().select_cells(CellRange::cell(2, 0));
    view.key_down("Enter", false, false);
    view.grid_mut().set_edit_value("Cy");
    view.key_down("Tab", false, false);
    assert_eq!(view.text_at(2, 0, "all").as_deref(), Some("Cy"));
    assert_eq!(view.grid().selection(), Some(CellRange::cell(2, 1)));
}

#[test]
fn test_invalid_edit_is_dropped() {
    let mut grid = staff();
    assert!(grid.start_cell_edit(0, 2));
    grid.set_edit_value("Marketing");
    assert!(!grid.end_cell_edit());
    assert!(!grid.is_editing());
    assert_eq!(grid.text_at(Scope::All, 0, 2), Some("Eng"));
}

#[test]
fn test_one_editor_at_a_time() {
    let mut grid = staff();
    assert!(grid.start_cell_edit(0, 0));
    assert!(!grid.start_cell_edit(1, 0));
    // Clicking elsewhere commits the open edit.
    grid.set_edit_value("Ana");
    grid.pointer_down(1, 0);
    assert!(!grid.is_editing());
    assert_eq!(grid.text_at(Scope::All, 0, 0), Some("Ana"));
}

#[test]
fn test_delete_clears_selected_cells() {
    let mut view = staff_view();
    view.grid_mut().select_cells(CellRange::new(0, 0, 1, 1));
    let renders = view.grid().render_count();
    assert_eq!(view.key_down("Delete", false, false), KeyOutcome::Handled);
    assert_eq!(view.grid().render_count(), renders + 1);
    assert_eq!(view.text_at(0, 0, "all").as_deref(), Some(""));
    assert_eq!(view.text_at(1, 1, "all").as_deref(), Some("0"));
}

// ============================================================================
// Clipboard and focus
// ============================================================================

#[test]
fn test_ctrl_keys_report_clipboard_outcomes() {
    let mut view = staff_view();
    assert_eq!(view.key_down("c", true, false), KeyOutcome::Ignored);
    view.grid_mut().select_cells(CellRange::new(0, 0, 1, 1));
    assert_eq!(
        view.key_down("c", true, false),
        KeyOutcome::Copy("Ann\t30\r\nBob\t25\r\n".to_string())
    );
    assert_eq!(view.key_down("v", true, false), KeyOutcome::Paste);
}

#[test]
fn test_page_clipboard_needs_focus() {
    let mut first = staff_view();
    let mut second = staff_view();
    first.grid_mut().select_cells(CellRange::cell(0, 0));
    second.grid_mut().select_cells(CellRange::cell(0, 1));

    assert_eq!(first.page_copy(), None);
    first.focus();
    assert!(first.is_focused());
    assert_eq!(first.page_copy().as_deref(), Some("Ann\r\n"));
    assert_eq!(second.page_copy(), None);

    second.focus();
    assert!(!first.is_focused());
    assert_eq!(second.page_paste("50\n60\n"), Some(2));
    assert_eq!(first.page_paste("nope"), None);
    assert_eq!(second.text_at(1, 1, "all").as_deref(), Some("60"));

    second.blur();
    assert!(!second.is_focused());
}

#[test]
fn test_outside_click_resets_transient_state() {
    let mut view = staff_view();
    view.grid_mut().select_cells(CellRange::cell(0, 0));
    view.grid_mut().open_filter(2).unwrap();
    view.click_outside();
    assert!(view.grid().filter_panel().is_none());
    assert_eq!(view.grid().selection(), None);
}

#[test]
fn test_paste_skips_disabled_cells() {
    let mut grid = staff();
    grid.disable_cell_at(0, 1);
    grid.select_cells(CellRange::cell(0, 0));
    assert_eq!(grid.paste("Ana\t99\r\n"), 1);
    assert_eq!(grid.text_at(Scope::All, 0, 0), Some("Ana"));
    assert_eq!(grid.text_at(Scope::All, 0, 1), Some("30"));
}

// ============================================================================
// Row drag
// ============================================================================

fn draggable() -> xlgrid::Grid {
    common::staff_with(GridConfig {
        draggable_rows: true,
        ..GridConfig::with_viewport(600.0, 200.0)
    })
}

#[test]
fn test_drag_row_down() {
    let mut grid = draggable();
    let moves = recorder::<RowMove>();
    let sink = moves.clone();
    grid.callbacks.after_move_row = Some(Box::new(move |m: RowMove| sink.borrow_mut().push(m)));

    assert!(grid.begin_row_drag(0));
    assert!(grid.drop_row(2));
    assert_eq!(all_names(&grid), ["Bob", "Cid", "Ann", "Dee", "Eve"]);
    assert_eq!(rendered_names(&grid), all_names(&grid));
    assert_eq!(*moves.borrow(), [RowMove { from: 0, to: 2 }]);
    assert_eq!(grid.selection(), Some(CellRange::new(2, 0, 2, 3)));
}

#[test]
fn test_drag_row_to_top() {
    let mut grid = draggable();
    assert!(grid.begin_row_drag(3));
    assert!(grid.drop_row(-1));
    assert_eq!(all_names(&grid), ["Dee", "Ann", "Bob", "Cid", "Eve"]);
}

#[test]
fn test_drop_in_place_is_noop() {
    let mut grid = draggable();
    assert!(grid.begin_row_drag(1));
    assert!(!grid.drop_row(1));
    assert!(grid.begin_row_drag(1));
    assert!(!grid.drop_row(0));
    assert_eq!(all_names(&grid), ["Ann", "Bob", "Cid", "Dee", "Eve"]);
}

#[test]
fn test_drag_refused_while_filtered_or_disabled() {
    let mut grid = draggable();
    grid.apply_filter(2, &["Eng"]).unwrap();
    assert!(!grid.can_drag_rows());
    assert!(!grid.begin_row_drag(0));

    let mut fixed = staff();
    assert!(!fixed.begin_row_drag(0));
}
