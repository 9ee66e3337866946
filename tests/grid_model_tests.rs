//! Row insertion, coercion, cell updates and summaries.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{all_names, empty_staff, recorder, staff};
use test_case::test_case;
use xlgrid::callbacks::CellChange;
use xlgrid::{CellValue, Column, ColumnKind, GridConfig, GridDescription, GridError, Scope};

// ============================================================================
// Insertion and coercion
// ============================================================================

#[test]
fn test_rows_keep_insertion_order() {
    let grid = staff();
    assert_eq!(all_names(&grid), ["Ann", "Bob", "Cid", "Dee", "Eve"]);
    assert_eq!(grid.row_count(Scope::All), 5);
    assert_eq!(grid.row_count(Scope::Rendered), 5);
}

#[test_case(&["Fay", "31", "Eng"] ; "too few values")]
#[test_case(&["Fay", "31", "Eng", "01-01-2020", "x"] ; "too many values")]
#[test_case(&["Fay", "3l", "Eng", "01-01-2020"] ; "bad integer")]
#[test_case(&["Fay", "31", "eng", "01-01-2020"] ; "choice is case sensitive")]
#[test_case(&["Fay", "31", "", "01-01-2020"] ; "empty choice")]
#[test_case(&["Fay", "31", "Eng", "2020-01-01"] ; "wrong date format")]
fn test_rejected_row_changes_nothing(values: &[&str]) {
    let mut grid = staff();
    let summaries = grid.summaries();
    assert!(!grid.add_row(values));
    assert_eq!(grid.row_count(Scope::All), 5);
    assert_eq!(grid.summaries(), summaries);
}

#[test]
fn test_arity_error_reports_counts() {
    let mut grid = staff();
    assert!(matches!(
        grid.try_add_row(&["only"]),
        Err(GridError::Arity {
            expected: 4,
            got: 1
        })
    ));
}

#[test]
fn test_coercion_normalizes_text_encoding() {
    let mut grid = empty_staff(GridConfig::default());
    grid.add_row(&["Ann", " 42 ", "Eng", "1/5/2020"]);
    grid.add_row(&["Bob", "", "Ops", ""]);

    assert_eq!(grid.text_at(Scope::All, 0, 1), Some("42"));
    assert_eq!(grid.text_at(Scope::All, 0, 3), Some("01-05-2020"));
    assert_eq!(grid.text_at(Scope::All, 1, 1), Some("0"));
    assert_eq!(grid.text_at(Scope::All, 1, 3), Some(""));
    assert_eq!(
        grid.value_at(Scope::All, 0, 1),
        Some(&CellValue::Integer(42))
    );
}

#[test]
fn test_float_cells_round_to_two_decimals() {
    let mut grid = xlgrid::Grid::new(GridConfig::default()).unwrap();
    grid.add_column(Column::new("Price", ColumnKind::Float, 80.0).with_summary(true))
        .unwrap();
    grid.add_row(&["1.005"]);
    grid.add_row(&["1234.5"]);
    assert_eq!(grid.text_at(Scope::All, 1, 0), Some("1234.50"));
    assert!(!grid.add_row(&["NaN"]));
    assert!(!grid.add_row(&["inf"]));
}

// ============================================================================
// Updates
// ============================================================================

#[test]
fn test_update_round_trips_through_text_at() {
    let mut grid = staff();
    assert!(grid.update_cell_at(2, 0, "Cy", Scope::Rendered, false));
    assert!(grid.update_cell_at(2, 3, "12-24-2024", Scope::All, false));
    assert_eq!(grid.text_at(Scope::Rendered, 2, 0), Some("Cy"));
    assert_eq!(grid.text_at(Scope::All, 2, 3), Some("12-24-2024"));
}

#[test]
fn test_rejected_update_keeps_old_value() {
    let mut grid = staff();
    assert!(!grid.update_cell_at(0, 1, "thirty", Scope::Rendered, false));
    assert!(!grid.update_cell_at(0, 2, "Legal", Scope::Rendered, false));
    assert!(!grid.update_cell_at(9, 0, "x", Scope::Rendered, false));
    assert!(!grid.update_cell_at(0, 9, "x", Scope::Rendered, false));
    assert_eq!(grid.text_at(Scope::All, 0, 1), Some("30"));
    assert_eq!(grid.text_at(Scope::All, 0, 2), Some("Eng"));
}

#[test]
fn test_change_callback_and_suppression() {
    let mut grid = staff();
    let log = recorder::<CellChange>();
    let sink = log.clone();
    grid.callbacks.after_change_cell_data =
        Some(Box::new(move |change: &CellChange| sink.borrow_mut().push(change.clone())));

    grid.update_cell_at(1, 1, "26", Scope::Rendered, false);
    grid.update_cell_at(1, 1, "27", Scope::Rendered, true);
    grid.update_cell_at(1, 1, "27", Scope::Rendered, false);

    let log = log.borrow();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].old_value, "25");
    assert_eq!(log[0].new_value, "26");
    assert_eq!(log[0].scope, Scope::Rendered);
    assert!(!log[0].filter_changed);
}

#[test]
fn test_choice_value_lookup() {
    let grid = staff();
    assert_eq!(grid.choice_value_at(Scope::All, 3, 2), Some("o"));
    assert_eq!(grid.choice_value_at(Scope::All, 3, 1), None);
}

#[test]
fn test_disabled_cells_are_not_editable() {
    let mut grid = staff();
    assert!(grid.is_cell_editable(0, 0));
    assert!(grid.disable_cell_at(0, 0));
    assert!(!grid.is_cell_editable(0, 0));
    assert!(!grid.start_cell_edit(0, 0));
    assert!(grid.enable_cell_at(0, 0));
    assert!(grid.start_cell_edit(0, 0));
}

#[test]
fn test_clear_data_keeps_columns() {
    let mut grid = staff();
    grid.clear_data();
    assert_eq!(grid.row_count(Scope::All), 0);
    assert_eq!(grid.column_count(), 4);
    assert!(grid.add_row(&["Zed", "50", "Ops", ""]));
}

// ============================================================================
// Summaries
// ============================================================================

#[test]
fn test_totals_and_subtotals() {
    let mut grid = staff();
    let age = &grid.summaries()[0];
    assert_eq!(age.column, 1);
    assert_eq!(age.total, "155");
    assert_eq!(age.subtotal, "155");

    grid.apply_filter(2, &["Eng"]).unwrap();
    let age = &grid.summaries()[0];
    assert_eq!(age.total, "155");
    assert_eq!(age.subtotal, "70");
}

#[test]
fn test_summaries_follow_edits() {
    let mut grid = staff();
    grid.update_cell_at(0, 1, "1030", Scope::All, false);
    assert_eq!(grid.summaries()[0].total, "1,155");
}

#[test]
fn test_float_summary_formatting() {
    let mut grid = xlgrid::Grid::new(GridConfig::default()).unwrap();
    grid.add_column(Column::new("Price", ColumnKind::Float, 80.0).with_summary(true))
        .unwrap();
    grid.add_row(&["999.5"]);
    grid.add_row(&["1000.25"]);
    assert_eq!(grid.summaries()[0].total, "1,999.75");
}

// ============================================================================
// Descriptions
// ============================================================================

#[test]
fn test_description_builds_grid() {
    let json = r#"{
        "columns": [
            { "name": "Item", "kind": { "type": "text" }, "width": 150 },
            { "name": "Size", "kind": { "type": "choice", "options": [
                { "label": "Small", "value": "s" },
                { "label": "Large", "value": "l" }
            ] }, "filterable": true }
        ],
        "rows": [["cup", "Small"], ["jug", "Large"], ["pot", "Huge"]]
    }"#;
    let (mut grid, rejected) = GridDescription::from_json(json).unwrap().build().unwrap();
    assert_eq!(rejected, 1);
    assert_eq!(grid.column(0).unwrap().width, 150.0);
    assert_eq!(grid.column(1).unwrap().width, 100.0);

    let size = grid.find_column("Size").unwrap();
    grid.apply_filter(size, &["Large"]).unwrap();
    assert_eq!(grid.rendered_text(), "jug\tLarge\r\n");
}
