//! Selection, editing, row drag and mutation requests.

use tracing::debug;

use super::Grid;
use crate::dataset::Scope;
use crate::editor::{EditSession, EditorKind, Mutation, MutationRequest};
use crate::selection::Direction;
use crate::types::CellRange;

impl Grid {
    fn bounds(&self) -> (usize, usize) {
        (self.dataset.len(Scope::Rendered), self.columns.len())
    }

    pub fn selection(&self) -> Option<CellRange> {
        self.selection.range()
    }

    pub fn is_selecting(&self) -> bool {
        self.selection.is_selecting()
    }

    /// Auto-scroll to the selection's end cell, notify and re-render.
    fn selection_changed(&mut self) {
        if let Some(range) = self.selection.range() {
            let rows = self.dataset.len(Scope::Rendered);
            self.viewport.ensure_row_visible(range.end_row, rows);
            if let (Some(left), Some(width)) = (
                self.layout.left(range.end_col),
                self.layout.width(range.end_col),
            ) {
                self.viewport.ensure_x_visible(left, left + width);
            }
            if let Some(backend) = self.backend.as_mut() {
                backend.set_scroll_top(self.viewport.scroll_top);
            }
            self.callbacks.cells_selected(range);
        }
        self.render();
    }

    /// Cell under a point of the body, in body-relative pixels.
    pub fn cell_at_point(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let (rows, _) = self.bounds();
        let row = self.viewport.row_at_y(y, rows)?;
        let col = self.layout.col_at_x(x + self.viewport.scroll_left)?;
        Some((row, col))
    }

    /// Pointer pressed on a cell: commits any open edit elsewhere, then
    /// anchors a new range.
    pub fn pointer_down(&mut self, row: usize, col: usize) -> bool {
        if self
            .editor
            .session()
            .is_some_and(|s| (s.row, s.col) != (row, col))
        {
            self.end_cell_edit();
        }
        let (rows, cols) = self.bounds();
        let changed = self.selection.pointer_down(row, col, rows, cols);
        if changed {
            self.selection_changed();
        }
        changed
    }

    pub fn pointer_move(&mut self, row: usize, col: usize) -> bool {
        let (rows, cols) = self.bounds();
        let changed = self.selection.pointer_move(row, col, rows, cols);
        if changed {
            self.selection_changed();
        }
        changed
    }

    pub fn pointer_up(&mut self) {
        self.selection.pointer_up();
    }

    /// Arrow-key navigation; `extend` is the Shift modifier.
    pub fn move_selection(&mut self, direction: Direction, extend: bool) -> bool {
        let (rows, cols) = self.bounds();
        let changed = self.selection.move_cursor(direction, extend, rows, cols);
        if changed {
            self.selection_changed();
        }
        changed
    }

    pub fn select_cells(&mut self, range: CellRange) -> bool {
        let (rows, cols) = self.bounds();
        let changed = self.selection.select(range, rows, cols);
        if changed {
            self.selection_changed();
        }
        changed
    }

    pub fn select_all(&mut self) -> bool {
        let (rows, cols) = self.bounds();
        let changed = self.selection.select_all(rows, cols);
        if changed {
            self.selection_changed();
        }
        changed
    }

    /// Hide the selection. Ignored while a pointer drag is selecting.
    pub fn clear_selection(&mut self) -> bool {
        let cleared = self.selection.clear();
        if cleared {
            self.render();
        }
        cleared
    }

    // ---- Editing ----

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.editor.session()
    }

    pub fn is_editing(&self) -> bool {
        self.editor.is_editing()
    }

    /// Open an editor on a rendered cell, seeded with its current value.
    ///
    /// No-op while another edit is open or when the cell is disabled.
    pub fn start_cell_edit(&mut self, row: usize, col: usize) -> bool {
        let Some(seed) = self.text_at(Scope::Rendered, row, col).map(str::to_string) else {
            return false;
        };
        self.start_edit_seeded(row, col, seed)
    }

    /// Open an editor seeded with `seed` instead of the current value
    /// (typing a printable key over a cell).
    pub fn start_cell_edit_with(&mut self, row: usize, col: usize, seed: &str) -> bool {
        self.start_edit_seeded(row, col, seed.to_string())
    }

    fn start_edit_seeded(&mut self, row: usize, col: usize, value: String) -> bool {
        if self.editor.is_editing() || !self.is_cell_editable(row, col) {
            return false;
        }
        let Some(column) = self.columns.get(col) else {
            return false;
        };
        let session = EditSession {
            row,
            col,
            value,
            kind: EditorKind::for_column(&column.kind),
        };
        if !self.editor.start(session) {
            return false;
        }
        let (rows, cols) = self.bounds();
        self.selection.select(CellRange::cell(row, col), rows, cols);
        self.selection_changed();
        true
    }

    pub fn set_edit_value(&mut self, value: &str) {
        self.editor.set_value(value);
    }

    /// Commit the open edit through a rendered-scope update. Returns true
    /// if the cell changed. A rejected value leaves the cell as it was.
    pub fn end_cell_edit(&mut self) -> bool {
        let Some(session) = self.editor.finish() else {
            return false;
        };
        let changed = self.update_cell_at(
            session.row,
            session.col,
            &session.value,
            Scope::Rendered,
            false,
        );
        if !changed {
            self.render();
        }
        debug!(row = session.row, col = session.col, changed, "edit committed");
        changed
    }

    /// Tear down the editor without writing.
    pub fn cancel_cell_edit(&mut self) -> bool {
        let cancelled = self.editor.cancel();
        if cancelled {
            self.render();
        }
        cancelled
    }

    /// Write `""` into every editable cell of the selection, rendering
    /// once. Returns the number of cells changed.
    pub fn delete_selected_cells(&mut self) -> usize {
        let Some(range) = self.selection.range() else {
            return 0;
        };
        let (r0, c0, r1, c1) = range.bounds();
        let mut changed = 0;
        for row in r0..=r1 {
            for col in c0..=c1 {
                if self.is_cell_editable(row, col)
                    && self
                        .write_cell(row, col, "", Scope::Rendered, false)
                        .unwrap_or(false)
                {
                    changed += 1;
                }
            }
        }
        if changed > 0 {
            self.refresh_data();
        }
        changed
    }

    // ---- Row drag ----

    /// Rows can be dragged only when enabled and nothing is filtered out.
    pub fn can_drag_rows(&self) -> bool {
        self.config.draggable_rows && self.dataset.is_unfiltered()
    }

    pub fn begin_row_drag(&mut self, source: usize) -> bool {
        let allowed = self.can_drag_rows() && source < self.dataset.len(Scope::All);
        self.drag.begin(source, allowed)
    }

    /// Drop the dragged row after row `target` (`-1` = before the first).
    /// The moved row becomes the selected full-width row.
    pub fn drop_row(&mut self, target: isize) -> bool {
        let rows = self.dataset.len(Scope::All);
        let Some(row_move) = self.drag.drop_on(target, rows) else {
            return false;
        };
        if !self.can_drag_rows() {
            return false;
        }
        if let Err(e) = self.dataset.move_row(row_move.from, row_move.to) {
            debug!(error = %e, "row move rejected");
            return false;
        }
        self.editor.cancel();
        debug!(from = row_move.from, to = row_move.to, "row moved");
        self.callbacks.row_moved(row_move);

        let cols = self.columns.len();
        self.selection.select(
            CellRange::new(row_move.to, 0, row_move.to, cols.saturating_sub(1)),
            rows,
            cols,
        );
        self.summary.recompute(&self.columns, &self.dataset);
        self.selection_changed();
        true
    }

    pub fn cancel_row_drag(&mut self) {
        self.drag.cancel();
    }

    // ---- Mutation requests ----

    /// Apply a change described by a popup, handle or host call.
    pub fn apply_mutation(&mut self, request: &MutationRequest) -> bool {
        let MutationRequest {
            row,
            column,
            ref mutation,
        } = *request;
        match mutation {
            Mutation::SetValue(value) => {
                self.update_cell_at(row, column, value, Scope::Rendered, false)
            }
            Mutation::SetStyle(style) => self.set_style_at(row, column, style),
            Mutation::Disable => self.disable_cell_at(row, column),
            Mutation::Enable => self.enable_cell_at(row, column),
            Mutation::ResizeColumn(width) => self.resize_column(column, *width),
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
    use super::super::tests::people;
    use super::*;
    use crate::config::GridConfig;
    use crate::drag::RowMove;
    use crate::types::{Column, ColumnKind};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_edit_seeds_current_value_and_commits() {
        let mut grid = people();
        assert!(grid.start_cell_edit(0, 1));
        assert_eq!(grid.edit_session().unwrap().value, "30");
        assert_eq!(grid.selection(), Some(CellRange::cell(0, 1)));
        assert!(!grid.start_cell_edit(1, 1), "one edit at a time");

        grid.set_edit_value("31");
        assert!(grid.end_cell_edit());
        assert_eq!(grid.text_at(Scope::All, 0, 1), Some("31"));
        assert_eq!(grid.summaries()[0].total, "96");
    }

    #[test]
    fn test_rejected_edit_keeps_value() {
        let mut grid = people();
        grid.start_cell_edit(0, 1);
        grid.set_edit_value("abc");
        assert!(!grid.end_cell_edit());
        assert!(!grid.is_editing());
        assert_eq!(grid.text_at(Scope::All, 0, 1), Some("30"));
    }

    #[test]
    fn test_cancel_discards() {
        let mut grid = people();
        grid.start_cell_edit_with(0, 0, "Q");
        assert_eq!(grid.edit_session().unwrap().value, "Q");
        assert!(grid.cancel_cell_edit());
        assert_eq!(grid.text_at(Scope::All, 0, 0), Some("A"));
    }

    #[test]
    fn test_disabled_cell_not_editable() {
        let mut grid = people();
        grid.disable_cell_at(0, 0);
        assert!(!grid.start_cell_edit(0, 0));
        assert!(!grid.is_editing());
    }

    #[test]
    fn test_pointer_down_elsewhere_commits_edit() {
        let mut grid = people();
        grid.start_cell_edit(0, 0);
        grid.set_edit_value("Z");
        grid.pointer_down(2, 2);
        assert!(!grid.is_editing());
        assert_eq!(grid.text_at(Scope::All, 0, 0), Some("Z"));
    }

    #[test]
    fn test_delete_selected_skips_invalid_and_disabled() {
        let mut grid = people();
        grid.disable_cell_at(1, 0);
        grid.select_cells(CellRange::new(0, 0, 1, 2));
        // Names A (cleared), B (disabled); ages -> 0; depts reject "".
        assert_eq!(grid.delete_selected_cells(), 3);
        assert_eq!(grid.text_at(Scope::All, 0, 0), Some(""));
        assert_eq!(grid.text_at(Scope::All, 1, 0), Some("B"));
        assert_eq!(grid.text_at(Scope::All, 1, 1), Some("0"));
        assert_eq!(grid.text_at(Scope::All, 0, 2), Some("Eng"));
    }

    #[test]
    fn test_selection_callback_and_autoscroll() {
        let mut grid = Grid::new(GridConfig::with_viewport(300.0, 200.0)).unwrap();
        grid.add_column(Column::new("N", ColumnKind::Integer, 100.0))
            .unwrap();
        for i in 0..100 {
            grid.add_row(&[i.to_string()]);
        }
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        grid.callbacks.after_select_cells = Some(Box::new(move |r: CellRange| {
            sink.borrow_mut().push(r);
        }));

        grid.pointer_down(7, 0);
        grid.pointer_up();
        for _ in 0..5 {
            grid.move_selection(Direction::Down, false);
        }
        assert_eq!(grid.selection(), Some(CellRange::cell(12, 0)));
        // Row 12 bottom = 312 -> scroll_top 112
        assert_eq!(grid.viewport().scroll_top, 112.0);
        assert_eq!(seen.borrow().len(), 6);
    }

    fn draggable() -> Grid {
        let config = GridConfig {
            draggable_rows: true,
            ..GridConfig::default()
        };
        let mut grid = Grid::new(config).unwrap();
        grid.add_column(Column::new("N", ColumnKind::Text, 50.0).filterable(true))
            .unwrap();
        grid.add_column(Column::new("V", ColumnKind::Integer, 50.0))
            .unwrap();
        for (n, v) in [("a", "1"), ("b", "2"), ("c", "3"), ("d", "4")] {
            grid.add_row(&[n, v]);
        }
        grid
    }

    fn order(grid: &Grid) -> Vec<String> {
        grid.dataset()
            .rendered_rows()
            .map(|r| r.text(0).to_string())
            .collect()
    }

    #[test]
    fn test_row_drag_moves_and_selects() {
        let mut grid = draggable();
        let moves = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&moves);
        grid.callbacks.after_move_row = Some(Box::new(move |m: RowMove| {
            sink.borrow_mut().push(m);
        }));

        assert!(grid.begin_row_drag(0));
        assert!(grid.drop_row(2));
        assert_eq!(order(&grid), ["b", "c", "a", "d"]);
        assert_eq!(grid.selection(), Some(CellRange::new(2, 0, 2, 1)));

        assert!(grid.begin_row_drag(3));
        assert!(grid.drop_row(-1));
        assert_eq!(order(&grid), ["d", "b", "c", "a"]);
        assert_eq!(
            *moves.borrow(),
            [RowMove { from: 0, to: 2 }, RowMove { from: 3, to: 0 }]
        );
    }

    #[test]
    fn test_row_drag_refused_while_filtered() {
        let mut grid = draggable();
        grid.apply_filter(0, &["a", "b"]).unwrap();
        assert!(!grid.begin_row_drag(0));
        grid.clear_all_filters();
        assert!(grid.begin_row_drag(0));
    }

    #[test]
    fn test_row_drag_off_by_default() {
        let mut grid = people();
        assert!(!grid.can_drag_rows());
        assert!(!grid.begin_row_drag(0));
    }

    #[test]
    fn test_mutation_requests() {
        let mut grid = people();
        assert!(grid.apply_mutation(&MutationRequest::new(
            0,
            1,
            Mutation::SetValue("33".into())
        )));
        assert_eq!(grid.text_at(Scope::Rendered, 0, 1), Some("33"));
        assert!(grid.apply_mutation(&MutationRequest::new(0, 0, Mutation::Disable)));
        assert!(!grid.is_cell_editable(0, 0));
        assert!(grid.apply_mutation(&MutationRequest::resize_column(2, 120.0)));
        assert_eq!(grid.column(2).unwrap().width, 120.0);
    }
}
