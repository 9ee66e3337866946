//! Keyboard handling for `XlGrid`.
//!
//! Keys are first mapped to a [`GridAction`] (pure, tested natively), then
//! dispatched onto the [`Grid`]. The grid surface and the open editor have
//! separate maps; the editor map wins while a session is open.

use tracing::trace;

use crate::grid::Grid;
use crate::selection::Direction;

/// What a key press asks the grid to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridAction {
    Move { direction: Direction, extend: bool },
    StartEdit,
    /// Start editing with the typed character replacing the value.
    StartEditWith(String),
    DeleteSelection,
    SelectAll,
    Copy,
    Paste,
    /// Commit the open edit, then optionally move the cursor.
    Commit(Option<Direction>),
    CancelEdit,
}

/// Result of dispatching an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not ours; let the browser handle the key.
    Ignored,
    Handled,
    /// Put this text on the system clipboard.
    Copy(String),
    /// Read the system clipboard and call `paste` with its text.
    Paste,
}

fn arrow(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" => Some(Direction::Up),
        "ArrowDown" => Some(Direction::Down),
        "ArrowLeft" => Some(Direction::Left),
        "ArrowRight" => Some(Direction::Right),
        _ => None,
    }
}

/// Map a key on the focused grid surface (no editor open).
///
/// `ctrl` covers both Ctrl and Cmd.
pub fn map_grid_key(key: &str, ctrl: bool, shift: bool) -> Option<GridAction> {
    if let Some(direction) = arrow(key) {
        return Some(GridAction::Move {
            direction,
            extend: shift,
        });
    }
    if ctrl {
        return match key {
            "a" | "A" => Some(GridAction::SelectAll),
            "c" | "C" => Some(GridAction::Copy),
            "v" | "V" => Some(GridAction::Paste),
            _ => None,
        };
    }
    match key {
        "Enter" | "NumpadEnter" | "F2" => Some(GridAction::StartEdit),
        "Delete" => Some(GridAction::DeleteSelection),
        // Named keys ("Shift", "Tab", "Escape") are longer than one char.
        _ if key.chars().count() == 1 => Some(GridAction::StartEditWith(key.to_string())),
        _ => None,
    }
}

/// Map a key pressed inside the open editor. Anything else is typing.
pub fn map_editor_key(key: &str) -> Option<GridAction> {
    match key {
        "Enter" | "NumpadEnter" | "ArrowDown" => Some(GridAction::Commit(Some(Direction::Down))),
        "ArrowUp" => Some(GridAction::Commit(Some(Direction::Up))),
        "Tab" => Some(GridAction::Commit(Some(Direction::Right))),
        "Escape" => Some(GridAction::CancelEdit),
        _ => None,
    }
}

/// Map a key for the grid's current state.
pub fn map_key(grid: &Grid, key: &str, ctrl: bool, shift: bool) -> Option<GridAction> {
    if grid.is_editing() {
        map_editor_key(key)
    } else {
        map_grid_key(key, ctrl, shift)
    }
}

/// The cursor cell: the selection anchor.
fn cursor(grid: &Grid) -> Option<(usize, usize)> {
    grid.selection().map(|r| (r.start_row, r.start_col))
}

pub fn dispatch(grid: &mut Grid, action: GridAction) -> KeyOutcome {
    trace!(?action, "key action");
    match action {
        GridAction::Move { direction, extend } => {
            if grid.selection().is_none() {
                return KeyOutcome::Ignored;
            }
            grid.move_selection(direction, extend);
            KeyOutcome::Handled
        }
        GridAction::StartEdit => match cursor(grid) {
            Some((row, col)) if grid.start_cell_edit(row, col) => KeyOutcome::Handled,
            _ => KeyOutcome::Ignored,
        },
        GridAction::StartEditWith(seed) => match cursor(grid) {
            Some((row, col)) if grid.start_cell_edit_with(row, col, &seed) => {
                KeyOutcome::Handled
            }
            _ => KeyOutcome::Ignored,
        },
        GridAction::DeleteSelection => {
            if grid.selection().is_none() {
                return KeyOutcome::Ignored;
            }
            grid.delete_selected_cells();
            KeyOutcome::Handled
        }
        GridAction::SelectAll => {
            grid.select_all();
            KeyOutcome::Handled
        }
        GridAction::Copy => grid
            .copy_selection()
            .map_or(KeyOutcome::Ignored, KeyOutcome::Copy),
        GridAction::Paste => {
            if grid.selection().is_none() {
                KeyOutcome::Ignored
            } else {
                KeyOutcome::Paste
            }
        }
        GridAction::Commit(next) => {
            grid.end_cell_edit();
            if let Some(direction) = next {
                grid.move_selection(direction, false);
            }
            KeyOutcome::Handled
        }
        GridAction::CancelEdit => {
            grid.cancel_cell_edit();
            KeyOutcome::Handled
        }
    }
}

/// Map and dispatch in one step.
pub fn key_down(grid: &mut Grid, key: &str, ctrl: bool, shift: bool) -> KeyOutcome {
    match map_key(grid, key, ctrl, shift) {
        Some(action) => dispatch(grid, action),
        None => KeyOutcome::Ignored,
    }
}

// ============================================================================
// DOM event handlers (wasm32)
// ============================================================================

/// Pointer distance from a header's right edge that starts a resize.
#[cfg(target_arch = "wasm32")]
const RESIZE_HANDLE_SIZE: f64 = 4.0;

/// Narrowest width a drag can resize a column to.
#[cfg(target_arch = "wasm32")]
const MIN_COLUMN_WIDTH: f64 = 16.0;

#[cfg(target_arch = "wasm32")]
mod dom {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use web_sys::{Element, KeyboardEvent, MouseEvent};

    use super::{key_down, KeyOutcome, MIN_COLUMN_WIDTH, RESIZE_HANDLE_SIZE};
    use crate::dataset::Scope;
    use crate::editor::MutationRequest;
    use crate::error::Result;
    use crate::viewer::filter_panel::PanelClick;
    use crate::viewer::{flush, ColumnResize, HostQueue, SharedState, XlGrid};

    fn target_element(event: &web_sys::Event) -> Option<Element> {
        event.target().and_then(|t| t.dyn_into::<Element>().ok())
    }

    fn within(target: Option<&Element>, selector: &str) -> bool {
        target.is_some_and(|t| matches!(t.closest(selector), Ok(Some(_))))
    }

    /// Pointer position relative to the container's visible top-left.
    fn local_point(s: &SharedState, event: &MouseEvent) -> (f64, f64) {
        let rect = s.container.get_bounding_client_rect();
        (
            f64::from(event.client_x()) - rect.left(),
            f64::from(event.client_y()) - rect.top(),
        )
    }

    /// Drop index for a pointer at body-relative `y`: after the row under
    /// it, or before it when the pointer is in the row's upper half. Below
    /// the last row means after the last row.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn drop_target(s: &SharedState, body_y: f64) -> isize {
        let viewport = s.grid.viewport();
        let rows = s.grid.row_count(Scope::All);
        let last = isize::try_from(rows).unwrap_or(isize::MAX) - 1;
        let content_y = (body_y + viewport.scroll_top).max(0.0);
        let row_height = viewport.row_height();
        let row = (content_y / row_height).floor() as usize;
        if row >= rows {
            return last;
        }
        let row = isize::try_from(row).unwrap_or(last);
        if content_y % row_height < row_height / 2.0 {
            row - 1
        } else {
            row
        }
    }

    impl XlGrid {
        pub(crate) fn show_filter_panel(s: &mut SharedState, column: usize) -> Result<()> {
            let left = s.grid.layout().left(column).unwrap_or_default();
            let top = s.grid.viewport().scroll_top + s.header_height;
            let SharedState { grid, panel, .. } = s;
            let opened = grid.open_filter(column)?;
            panel.show(opened, left, top);
            Ok(())
        }

        fn header_mouse_down(s: &mut SharedState, target: Option<&Element>, x: f64) {
            if let Some(col) = target
                .and_then(|t| t.closest(".xlgrid-filter").ok().flatten())
                .and_then(|el| el.get_attribute("data-col"))
                .and_then(|c| c.parse::<usize>().ok())
            {
                if let Err(e) = Self::show_filter_panel(s, col) {
                    tracing::debug!(error = %e, "filter panel not opened");
                }
                return;
            }
            let content_x = x + s.grid.viewport().scroll_left;
            let layout = s.grid.layout();
            let edge = (0..layout.len()).find(|&c| {
                let right =
                    layout.left(c).unwrap_or_default() + layout.width(c).unwrap_or_default();
                (content_x - right).abs() <= RESIZE_HANDLE_SIZE
            });
            if let Some(column) = edge {
                s.resize = Some(ColumnResize {
                    column,
                    start_x: x,
                    start_width: layout.width(column).unwrap_or_default(),
                });
            }
        }

        pub(crate) fn internal_mouse_down(
            state: &Rc<RefCell<SharedState>>,
            queue: &HostQueue,
            event: &MouseEvent,
        ) {
            {
                let Ok(mut s) = state.try_borrow_mut() else {
                    return;
                };
                let target = target_element(event);
                if within(target.as_ref(), ".xlgrid-filter-panel")
                    || within(target.as_ref(), ".xlgrid-editor")
                {
                    return;
                }
                let (x, y) = local_point(&s, event);
                if y < s.header_height {
                    Self::header_mouse_down(&mut s, target.as_ref(), x);
                    s.sync_overlays();
                } else {
                    let body_y = y - s.header_height;
                    let in_gutter = x + s.grid.viewport().scroll_left
                        < s.grid.config().row_header_width;
                    let rows = s.grid.row_count(Scope::Rendered);
                    if s.grid.can_drag_rows() && in_gutter {
                        if let Some(row) = s.grid.viewport().row_at_y(body_y, rows) {
                            s.row_drag = s.grid.begin_row_drag(row);
                        }
                    } else if let Some((row, col)) = s.grid.cell_at_point(x, body_y) {
                        s.grid.pointer_down(row, col);
                        s.sync_overlays();
                    }
                }
            }
            flush(queue);
        }

        pub(crate) fn internal_mouse_move(
            state: &Rc<RefCell<SharedState>>,
            queue: &HostQueue,
            event: &MouseEvent,
        ) {
            {
                let Ok(mut s) = state.try_borrow_mut() else {
                    return;
                };
                let (x, y) = local_point(&s, event);
                if let Some(resize) = s.resize {
                    let width = (resize.start_width + x - resize.start_x).max(MIN_COLUMN_WIDTH);
                    s.grid
                        .apply_mutation(&MutationRequest::resize_column(resize.column, width));
                } else if s.grid.is_selecting() {
                    let body_y = y - s.header_height;
                    if let Some((row, col)) = s.grid.cell_at_point(x, body_y) {
                        s.grid.pointer_move(row, col);
                    }
                }
            }
            flush(queue);
        }

        pub(crate) fn internal_mouse_up(
            state: &Rc<RefCell<SharedState>>,
            queue: &HostQueue,
            event: &MouseEvent,
        ) {
            {
                let Ok(mut s) = state.try_borrow_mut() else {
                    return;
                };
                // A finished resize was already applied on move.
                if s.resize.take().is_none() {
                    if std::mem::take(&mut s.row_drag) {
                        let (_, y) = local_point(&s, event);
                        let target = drop_target(&s, y - s.header_height);
                        if !s.grid.drop_row(target) {
                            s.grid.cancel_row_drag();
                        }
                    } else {
                        s.grid.pointer_up();
                    }
                }
            }
            flush(queue);
        }

        pub(crate) fn internal_double_click(
            state: &Rc<RefCell<SharedState>>,
            queue: &HostQueue,
            event: &MouseEvent,
        ) {
            {
                let Ok(mut s) = state.try_borrow_mut() else {
                    return;
                };
                let (x, y) = local_point(&s, event);
                if y >= s.header_height {
                    if let Some((row, col)) = s.grid.cell_at_point(x, y - s.header_height) {
                        s.grid.start_cell_edit(row, col);
                        s.sync_overlays();
                    }
                }
            }
            flush(queue);
        }

        pub(crate) fn internal_key_down(
            state: &Rc<RefCell<SharedState>>,
            queue: &HostQueue,
            event: &KeyboardEvent,
        ) {
            let outcome = {
                let Ok(mut s) = state.try_borrow_mut() else {
                    return;
                };
                let key = event.key();
                if s.panel.is_open() {
                    match key.as_str() {
                        "Escape" => {
                            s.grid.cancel_filter();
                        }
                        "Enter" => {
                            s.grid.commit_filter();
                        }
                        _ => return,
                    }
                    s.sync_overlays();
                    KeyOutcome::Handled
                } else {
                    if s.grid.is_editing() {
                        let date_format = s.grid.config().date_format.clone();
                        if let Some(value) = s.input.value(&date_format) {
                            s.grid.set_edit_value(&value);
                        }
                    }
                    let ctrl = event.ctrl_key() || event.meta_key();
                    let outcome = key_down(&mut s.grid, &key, ctrl, event.shift_key());
                    s.sync_overlays();
                    outcome
                }
            };
            // Copy and paste continue as native clipboard events, which the
            // page listeners route to the focused grid.
            if outcome == KeyOutcome::Handled {
                event.prevent_default();
            }
            flush(queue);
        }

        pub(crate) fn internal_panel_click(
            state: &Rc<RefCell<SharedState>>,
            queue: &HostQueue,
            event: &MouseEvent,
        ) {
            {
                let Ok(mut s) = state.try_borrow_mut() else {
                    return;
                };
                let Some(target) = target_element(event) else {
                    return;
                };
                let Some(click) = s.panel.click_target(&target) else {
                    return;
                };
                let SharedState { grid, panel, .. } = &mut *s;
                match click {
                    PanelClick::Ok => {
                        grid.commit_filter();
                    }
                    PanelClick::Cancel => {
                        grid.cancel_filter();
                    }
                    PanelClick::ClearAll => {
                        grid.clear_all_filters();
                    }
                    PanelClick::Node(tag) => {
                        if let Some(open) = grid.filter_panel_mut() {
                            open.toggle_node(&tag);
                            panel.refresh(open);
                        }
                    }
                }
                s.sync_overlays();
            }
            flush(queue);
        }

        pub(crate) fn internal_panel_search(state: &Rc<RefCell<SharedState>>) {
            let Ok(mut s) = state.try_borrow_mut() else {
                return;
            };
            let text = s.panel.search_value();
            let SharedState { grid, panel, .. } = &mut *s;
            if let Some(open) = grid.filter_panel_mut() {
                open.set_search(&text);
                panel.refresh(open);
            }
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::dataset::Scope;
    use crate::grid::tests::people;
    use crate::types::CellRange;
    use test_case::test_case;

    #[test_case("ArrowUp", false, GridAction::Move { direction: Direction::Up, extend: false })]
    #[test_case("ArrowRight", true, GridAction::Move { direction: Direction::Right, extend: true })]
    #[test_case("Enter", false, GridAction::StartEdit)]
    #[test_case("F2", false, GridAction::StartEdit)]
    #[test_case("Delete", false, GridAction::DeleteSelection)]
    #[test_case("x", false, GridAction::StartEditWith("x".into()))]
    #[test_case("X", true, GridAction::StartEditWith("X".into()))]
    fn test_grid_keys(key: &str, shift: bool, expected: GridAction) {
        assert_eq!(map_grid_key(key, false, shift), Some(expected));
    }

    #[test_case("c", GridAction::Copy)]
    #[test_case("V", GridAction::Paste)]
    #[test_case("a", GridAction::SelectAll)]
    fn test_ctrl_keys(key: &str, expected: GridAction) {
        assert_eq!(map_grid_key(key, true, false), Some(expected));
    }

    #[test_case("Shift")]
    #[test_case("Escape")]
    #[test_case("Tab")]
    fn test_named_keys_ignored_on_grid(key: &str) {
        assert_eq!(map_grid_key(key, false, false), None);
    }

    #[test_case("Enter", Some(GridAction::Commit(Some(Direction::Down))))]
    #[test_case("NumpadEnter", Some(GridAction::Commit(Some(Direction::Down))))]
    #[test_case("ArrowDown", Some(GridAction::Commit(Some(Direction::Down))))]
    #[test_case("ArrowUp", Some(GridAction::Commit(Some(Direction::Up))))]
    #[test_case("Tab", Some(GridAction::Commit(Some(Direction::Right))))]
    #[test_case("Escape", Some(GridAction::CancelEdit))]
    #[test_case("ArrowLeft", None)]
    #[test_case("q", None)]
    fn test_editor_keys(key: &str, expected: Option<GridAction>) {
        assert_eq!(map_editor_key(key), expected);
    }

    #[test]
    fn test_typing_over_cell_replaces_value() {
        let mut grid = people();
        grid.select_cells(CellRange::cell(1, 0));
        assert_eq!(key_down(&mut grid, "Z", false, true), KeyOutcome::Handled);
        assert_eq!(grid.edit_session().unwrap().value, "Z");
        assert_eq!(key_down(&mut grid, "Enter", false, false), KeyOutcome::Handled);
        assert_eq!(grid.text_at(Scope::All, 1, 0), Some("Z"));
        assert_eq!(grid.selection(), Some(CellRange::cell(2, 0)));
    }

    #[test]
    fn test_escape_cancels_and_keeps_value() {
        let mut grid = people();
        grid.select_cells(CellRange::cell(0, 1));
        key_down(&mut grid, "F2", false, false);
        grid.set_edit_value("99");
        key_down(&mut grid, "Escape", false, false);
        assert!(!grid.is_editing());
        assert_eq!(grid.text_at(Scope::All, 0, 1), Some("30"));
    }

    #[test]
    fn test_tab_commits_and_moves_right() {
        let mut grid = people();
        grid.select_cells(CellRange::cell(0, 0));
        key_down(&mut grid, "Enter", false, false);
        grid.set_edit_value("Ann");
        key_down(&mut grid, "Tab", false, false);
        assert_eq!(grid.text_at(Scope::All, 0, 0), Some("Ann"));
        assert_eq!(grid.selection(), Some(CellRange::cell(0, 1)));
    }

    #[test]
    fn test_copy_and_paste_outcomes() {
        let mut grid = people();
        assert_eq!(key_down(&mut grid, "c", true, false), KeyOutcome::Ignored);
        assert_eq!(key_down(&mut grid, "v", true, false), KeyOutcome::Ignored);
        grid.select_cells(CellRange::new(0, 0, 1, 1));
        assert_eq!(
            key_down(&mut grid, "c", true, false),
            KeyOutcome::Copy("A\t30\r\nB\t25\r\n".into())
        );
        assert_eq!(key_down(&mut grid, "v", true, false), KeyOutcome::Paste);
    }

    #[test]
    fn test_delete_clears_editable_cells() {
        let mut grid = people();
        grid.select_cells(CellRange::new(0, 0, 0, 1));
        key_down(&mut grid, "Delete", false, false);
        assert_eq!(grid.text_at(Scope::All, 0, 0), Some(""));
        assert_eq!(grid.text_at(Scope::All, 0, 1), Some("0"));
    }
}
