//! Host callbacks fired after observable state changes.

use serde::Serialize;

use crate::dataset::Scope;
use crate::drag::RowMove;
use crate::render::{CellRenderData, RenderFrame};
use crate::types::CellRange;

/// Payload of `after_change_cell_data`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellChange {
    pub row: usize,
    pub column: usize,
    pub old_value: String,
    pub new_value: String,
    pub scope: Scope,
    /// Whether the change altered the row's filter membership.
    pub filter_changed: bool,
}

/// Optional hooks. Unset hooks cost nothing.
#[derive(Default)]
pub struct GridCallbacks {
    pub after_change_cell_data: Option<Box<dyn FnMut(&CellChange)>>,
    pub after_render_grid: Option<Box<dyn FnMut(&RenderFrame)>>,
    pub after_render_cell: Option<Box<dyn FnMut(&CellRenderData)>>,
    pub after_move_row: Option<Box<dyn FnMut(RowMove)>>,
    pub after_select_cells: Option<Box<dyn FnMut(CellRange)>>,
    pub after_resize_column: Option<Box<dyn FnMut(usize, f64)>>,
}

impl GridCallbacks {
    pub(crate) fn cell_changed(&mut self, change: &CellChange) {
        if let Some(cb) = self.after_change_cell_data.as_mut() {
            cb(change);
        }
    }

    pub(crate) fn grid_rendered(&mut self, frame: &RenderFrame) {
        if let Some(cb) = self.after_render_cell.as_mut() {
            for cell in frame.cells() {
                cb(cell);
            }
        }
        if let Some(cb) = self.after_render_grid.as_mut() {
            cb(frame);
        }
    }

    pub(crate) fn row_moved(&mut self, row_move: RowMove) {
        if let Some(cb) = self.after_move_row.as_mut() {
            cb(row_move);
        }
    }

    pub(crate) fn cells_selected(&mut self, range: CellRange) {
        if let Some(cb) = self.after_select_cells.as_mut() {
            cb(range);
        }
    }

    pub(crate) fn column_resized(&mut self, column: usize, width: f64) {
        if let Some(cb) = self.after_resize_column.as_mut() {
            cb(column, width);
        }
    }
}

impl std::fmt::Debug for GridCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridCallbacks")
            .field("after_change_cell_data", &self.after_change_cell_data.is_some())
            .field("after_render_grid", &self.after_render_grid.is_some())
            .field("after_render_cell", &self.after_render_cell.is_some())
            .field("after_move_row", &self.after_move_row.is_some())
            .field("after_select_cells", &self.after_select_cells.is_some())
            .field("after_resize_column", &self.after_resize_column.is_some())
            .finish()
    }
}
