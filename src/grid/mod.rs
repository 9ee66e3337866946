//! The grid engine.
//!
//! `Grid` owns the columns, the dual-tier dataset, the viewport and all
//! transient UI state (selection, edit session, row drag, filter panel).
//! Every public mutation leaves `all`, `rendered` and both cell encodings
//! consistent before it returns.
//!
//! Public mutators follow the silent-failure contract: a rejected write is
//! a no-op reported as `false` and logged at debug level. `try_*` variants
//! return the error instead.

mod clipboard;
mod description;
mod filtering;
mod interaction;

pub use description::GridDescription;

use tracing::{debug, trace, warn};

use crate::callbacks::{CellChange, GridCallbacks};
use crate::config::GridConfig;
use crate::dataset::{Dataset, Scope};
use crate::drag::RowDrag;
use crate::editor::EditController;
use crate::error::{GridError, Result};
use crate::filter::{self, FilterPanel};
use crate::focus::GridId;
use crate::layout::{ColumnLayout, Viewport};
use crate::render::{build_frame, FrameParams, RenderBackend, RenderFrame};
use crate::selection::SelectionModel;
use crate::summary::{ColumnSummary, SummaryState};
use crate::types::{CellValue, Column, Row};

pub struct Grid {
    id: GridId,
    config: GridConfig,
    columns: Vec<Column>,
    layout: ColumnLayout,
    dataset: Dataset,
    viewport: Viewport,
    selection: SelectionModel,
    editor: EditController,
    drag: RowDrag,
    panel: Option<FilterPanel>,
    summary: SummaryState,
    frame: Option<RenderFrame>,
    render_count: usize,
    backend: Option<Box<dyn RenderBackend>>,
    pub callbacks: GridCallbacks,
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("id", &self.id)
            .field("columns", &self.columns.len())
            .field("rows", &self.dataset.len(Scope::All))
            .field("rendered", &self.dataset.len(Scope::Rendered))
            .field("render_count", &self.render_count)
            .finish_non_exhaustive()
    }
}

impl Grid {
    pub fn new(config: GridConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            id: GridId::next(),
            viewport: Viewport::new(&config),
            layout: ColumnLayout::default(),
            config,
            columns: Vec::new(),
            dataset: Dataset::new(),
            selection: SelectionModel::new(),
            editor: EditController::default(),
            drag: RowDrag::default(),
            panel: None,
            summary: SummaryState::default(),
            frame: None,
            render_count: 0,
            backend: None,
            callbacks: GridCallbacks::default(),
        })
    }

    pub fn id(&self) -> GridId {
        self.id
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn row_count(&self, scope: Scope) -> usize {
        self.dataset.len(scope)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    /// Attach the painter that receives every rendered frame.
    pub fn set_backend(&mut self, backend: Box<dyn RenderBackend>) {
        self.backend = Some(backend);
    }

    // ---- Columns ----

    /// Register a column. Columns are fixed once rows exist, since every
    /// row must carry one cell per column.
    pub fn add_column(&mut self, column: Column) -> Result<usize> {
        if !self.dataset.is_empty() {
            return Err(GridError::Config(format!(
                "column {:?} registered after rows were added",
                column.name
            )));
        }
        debug!(name = %column.name, kind = column.kind.name(), "column added");
        self.columns.push(column);
        self.relayout();
        self.summary.recompute(&self.columns, &self.dataset);
        Ok(self.columns.len() - 1)
    }

    /// Set a column's width. Non-positive or non-finite widths are ignored.
    pub fn resize_column(&mut self, index: usize, width: f64) -> bool {
        if !width.is_finite() || width <= 0.0 {
            return false;
        }
        let Some(column) = self.columns.get_mut(index) else {
            return false;
        };
        column.width = width;
        self.relayout();
        self.callbacks.column_resized(index, width);
        self.render();
        true
    }

    fn relayout(&mut self) {
        let gutter = if self.config.draggable_rows {
            self.config.row_header_width
        } else {
            0.0
        };
        self.layout = ColumnLayout::new(self.columns.iter().map(|c| c.width), gutter);
    }

    // ---- Rows ----

    /// Insert a row of raw values, one per column. Returns false (and
    /// inserts nothing) on an arity mismatch or any failed coercion.
    pub fn add_row<S: AsRef<str>>(&mut self, values: &[S]) -> bool {
        match self.try_add_row(values) {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "row rejected");
                false
            }
        }
    }

    /// Like [`Grid::add_row`], returning the new row's index in `all`.
    pub fn try_add_row<S: AsRef<str>>(&mut self, values: &[S]) -> Result<usize> {
        if values.len() != self.columns.len() {
            return Err(GridError::Arity {
                expected: self.columns.len(),
                got: values.len(),
            });
        }
        let cells = self
            .columns
            .iter()
            .zip(values)
            .enumerate()
            .map(|(i, (column, raw))| {
                column
                    .kind
                    .coerce(i, raw.as_ref(), &self.config.date_format)
            })
            .collect::<Result<Vec<_>>>()?;

        let (passed, visible) = filter::membership(&self.columns, &cells);
        let mut row = Row::new(cells);
        row.filtered_by = passed;
        self.summary.add_row(&row, visible);
        self.dataset.push(row, visible);
        trace!(visible, "row added");

        self.refresh_view();
        Ok(self.dataset.len(Scope::All) - 1)
    }

    /// Write a raw value into one cell.
    ///
    /// Unchanged values are a no-op: no callback, no render. In `Rendered`
    /// scope a row that stops matching an active filter loses that
    /// column's membership but stays rendered until the next filter pass.
    /// In `All` scope a row that starts matching again is put back into
    /// `rendered` at its original position once it passes every active
    /// filter.
    pub fn update_cell_at(
        &mut self,
        row: usize,
        column: usize,
        value: &str,
        scope: Scope,
        suppress_callback: bool,
    ) -> bool {
        match self.try_update_cell_at(row, column, value, scope, suppress_callback) {
            Ok(changed) => changed,
            Err(e) => {
                debug!(row, column, error = %e, "cell update rejected");
                false
            }
        }
    }

    /// Like [`Grid::update_cell_at`], returning the rejection reason.
    pub fn try_update_cell_at(
        &mut self,
        row: usize,
        column: usize,
        value: &str,
        scope: Scope,
        suppress_callback: bool,
    ) -> Result<bool> {
        let changed = self.write_cell(row, column, value, scope, suppress_callback)?;
        if changed {
            self.refresh_data();
        }
        Ok(changed)
    }

    /// Coerce and store one value without rendering.
    fn write_cell(
        &mut self,
        row: usize,
        column: usize,
        value: &str,
        scope: Scope,
        suppress_callback: bool,
    ) -> Result<bool> {
        let target = self
            .columns
            .get(column)
            .ok_or(GridError::NoSuchColumn { column })?;
        let index = self.dataset.resolve(scope, row)?;
        let coerced = target
            .kind
            .coerce(column, value, &self.config.date_format)?;
        let passes = target
            .filter
            .as_ref()
            .filter(|f| f.is_filtered)
            .map(|f| f.accepts(coerced.text()));
        let active = filter::active_columns(&self.columns);

        let stored = self
            .dataset
            .row_mut(Scope::All, index)
            .ok_or(GridError::NoSuchRow { row })?;
        let cell = stored
            .cell_mut(column)
            .ok_or(GridError::NoSuchColumn { column })?;
        if cell.text() == coerced.text() {
            return Ok(false);
        }
        let old_value = cell.text().to_string();
        cell.assign(coerced);
        let new_value = cell.text().to_string();

        let mut filter_changed = false;
        let mut reinclude = false;
        if let Some(passes) = passes {
            filter_changed = if passes {
                stored.filtered_by.insert(column)
            } else {
                stored.filtered_by.remove(&column)
            };
            reinclude = passes && scope == Scope::All && stored.passes_all(&active);
        }
        let inserted = if reinclude {
            self.dataset.insert_rendered(index)
        } else {
            None
        };
        if let Some(pos) = inserted {
            // Rendered rows at or after `pos` moved down by one.
            self.editor.shift_rows_from(pos);
            self.selection.shift_rows_from(pos);
            debug!(row = index, pos, "row re-included by edit");
        }
        trace!(row, column, %old_value, %new_value, scope = scope.as_str(), "cell updated");

        if !suppress_callback {
            self.callbacks.cell_changed(&CellChange {
                row,
                column,
                old_value,
                new_value,
                scope,
                filter_changed,
            });
        }
        Ok(true)
    }

    pub fn value_at(&self, scope: Scope, row: usize, column: usize) -> Option<&CellValue> {
        self.dataset.cell(scope, row, column).map(|c| c.value())
    }

    /// String encoding of a cell.
    pub fn text_at(&self, scope: Scope, row: usize, column: usize) -> Option<&str> {
        self.dataset.text_at(scope, row, column)
    }

    /// Host value of a choice cell (the option's `value` for its label).
    pub fn choice_value_at(&self, scope: Scope, row: usize, column: usize) -> Option<&str> {
        let label = self.text_at(scope, row, column)?;
        self.columns.get(column)?.value_by_label(label)
    }

    /// Remove every row. Filters keep their selections.
    pub fn clear_data(&mut self) {
        self.editor.cancel();
        self.drag.cancel();
        self.dataset.clear();
        self.selection.clamp_to(0, self.columns.len());
        self.viewport.scroll_to(0.0, 0);
        debug!("data cleared");
        self.refresh_data();
    }

    // ---- Cell overlays ----

    pub fn set_style_at(&mut self, row: usize, column: usize, style: &str) -> bool {
        let Some(cell) = self
            .dataset
            .row_mut(Scope::Rendered, row)
            .and_then(|r| r.cell_mut(column))
        else {
            return false;
        };
        cell.style = style.to_string();
        self.render();
        true
    }

    pub fn style_at(&self, row: usize, column: usize) -> Option<&str> {
        self.dataset
            .cell(Scope::Rendered, row, column)
            .map(|c| c.style.as_str())
    }

    pub fn disable_cell_at(&mut self, row: usize, column: usize) -> bool {
        self.set_cell_disabled(row, column, true)
    }

    pub fn enable_cell_at(&mut self, row: usize, column: usize) -> bool {
        self.set_cell_disabled(row, column, false)
    }

    fn set_cell_disabled(&mut self, row: usize, column: usize, disabled: bool) -> bool {
        let Some(cell) = self
            .dataset
            .row_mut(Scope::Rendered, row)
            .and_then(|r| r.cell_mut(column))
        else {
            return false;
        };
        cell.disabled = disabled;
        self.render();
        true
    }

    /// A cell is editable iff neither its column nor the cell is disabled.
    pub fn is_cell_editable(&self, row: usize, column: usize) -> bool {
        let Some(col) = self.columns.get(column) else {
            return false;
        };
        self.dataset
            .cell(Scope::Rendered, row, column)
            .is_some_and(|c| !col.disabled && !c.disabled)
    }

    // ---- Summaries ----

    pub fn summaries(&self) -> Vec<ColumnSummary> {
        self.summary.published()
    }

    /// Recompute the summaries and re-render.
    pub fn calculate_summary(&mut self) {
        self.summary.recompute(&self.columns, &self.dataset);
        self.render();
    }

    // ---- Rendering ----

    /// Build the frame for the current window, hand it to the backend and
    /// fire the render callbacks.
    pub fn render(&mut self) -> &RenderFrame {
        let frame = build_frame(FrameParams {
            columns: &self.columns,
            dataset: &self.dataset,
            layout: &self.layout,
            viewport: &self.viewport,
            selection: self.selection.range(),
            summaries: self.summary.published(),
        });
        if let Some(backend) = self.backend.as_mut() {
            if let Err(e) = backend.paint(&frame) {
                warn!(error = %e, "paint failed");
            }
        }
        self.callbacks.grid_rendered(&frame);
        self.render_count += 1;
        trace!(window = ?frame.window, count = self.render_count, "rendered");
        self.frame.insert(frame)
    }

    /// The last rendered frame.
    pub fn frame(&self) -> Option<&RenderFrame> {
        self.frame.as_ref()
    }

    /// Number of renders so far.
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    /// Scroll the body. Re-renders only when the first visible row changes.
    pub fn scroll_to(&mut self, scroll_top: f64) -> bool {
        let rows = self.dataset.len(Scope::Rendered);
        if self.viewport.scroll_to(scroll_top, rows) {
            self.render();
            true
        } else {
            false
        }
    }

    pub fn set_scroll_left(&mut self, scroll_left: f64) {
        self.viewport.scroll_left = scroll_left.max(0.0);
    }

    pub fn resize_viewport(&mut self, width: f64, height: f64) {
        self.viewport.resize(width, height);
        self.refresh_view();
    }

    /// Clamp transient state to the current rendered size and re-render.
    fn refresh_view(&mut self) {
        let rows = self.dataset.len(Scope::Rendered);
        self.selection.clamp_to(rows, self.columns.len());
        self.viewport.clamp(rows);
        if let Some(backend) = self.backend.as_mut() {
            backend.set_scroll_top(self.viewport.scroll_top);
        }
        self.render();
    }

    /// Recompute summaries, then refresh the view.
    fn refresh_data(&mut self) {
        self.summary.recompute(&self.columns, &self.dataset);
        self.refresh_view();
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
pub(crate) mod tests {
    use super::*;
    use crate::types::{ChoiceOption, ColumnKind};

    /// Name / Age / Dept grid with rows A, B, C.
    pub(crate) fn people() -> Grid {
        let mut grid = Grid::new(GridConfig::with_viewport(600.0, 200.0)).unwrap();
        grid.add_column(Column::new("Name", ColumnKind::Text, 100.0))
            .unwrap();
        grid.add_column(
            Column::new("Age", ColumnKind::Integer, 60.0)
                .filterable(true)
                .with_summary(true),
        )
        .unwrap();
        grid.add_column(
            Column::new(
                "Dept",
                ColumnKind::Choice(vec![
                    ChoiceOption::new("Eng", "e"),
                    ChoiceOption::new("Sales", "s"),
                ]),
                80.0,
            )
            .filterable(true),
        )
        .unwrap();
        for row in [["A", "30", "Eng"], ["B", "25", "Sales"], ["C", "40", "Eng"]] {
            assert!(grid.add_row(&row));
        }
        grid
    }

    #[test]
    fn test_rejected_rows_leave_no_trace() {
        let mut grid = people();
        assert!(!grid.add_row(&["D", "x", "Eng"]));
        assert!(!grid.add_row(&["D", "1"]));
        assert!(!grid.add_row(&["D", "1", "eng"]));
        assert_eq!(grid.row_count(Scope::All), 3);
        assert!(matches!(
            grid.try_add_row(&["D"]),
            Err(GridError::Arity {
                expected: 3,
                got: 1
            })
        ));
    }

    #[test]
    fn test_columns_fixed_after_rows() {
        let mut grid = people();
        assert!(grid
            .add_column(Column::new("Late", ColumnKind::Text, 10.0))
            .is_err());
    }

    #[test]
    fn test_unchanged_value_is_noop() {
        let mut grid = people();
        let renders = grid.render_count();
        assert!(!grid.update_cell_at(0, 1, " 30 ", Scope::Rendered, false));
        assert_eq!(grid.render_count(), renders);
    }

    #[test]
    fn test_choice_value_lookup() {
        let grid = people();
        assert_eq!(grid.choice_value_at(Scope::All, 1, 2), Some("s"));
        assert_eq!(grid.choice_value_at(Scope::All, 1, 0), None);
    }

    #[test]
    fn test_style_and_disable_overlays() {
        let mut grid = people();
        assert!(grid.set_style_at(1, 0, "color: red"));
        assert_eq!(grid.style_at(1, 0), Some("color: red"));
        assert!(!grid.set_style_at(9, 0, "x"));

        assert!(grid.is_cell_editable(1, 0));
        grid.disable_cell_at(1, 0);
        assert!(!grid.is_cell_editable(1, 0));
        let frame = grid.frame().unwrap();
        let cell = frame.cells().find(|c| c.row == 1 && c.col == 0).unwrap();
        assert!(cell.disabled);
        assert_eq!(cell.style, "color: red");
        grid.enable_cell_at(1, 0);
        assert!(grid.is_cell_editable(1, 0));
    }

    #[test]
    fn test_resize_column() {
        let mut grid = people();
        let widths = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let sink = std::rc::Rc::clone(&widths);
        grid.callbacks.after_resize_column = Some(Box::new(move |c: usize, w: f64| {
            sink.borrow_mut().push((c, w));
        }));
        assert!(grid.resize_column(0, 150.0));
        assert!(!grid.resize_column(0, 0.0));
        assert!(!grid.resize_column(7, 10.0));
        assert_eq!(*widths.borrow(), [(0, 150.0)]);
        assert_eq!(grid.layout().left(1), Some(150.0));
    }

    #[test]
    fn test_clear_data() {
        let mut grid = people();
        grid.select_all();
        grid.clear_data();
        assert_eq!(grid.row_count(Scope::All), 0);
        assert_eq!(grid.row_count(Scope::Rendered), 0);
        assert_eq!(grid.selection(), None);
        assert_eq!(grid.summaries()[0].total, "0");
        assert!(grid.add_row(&["Z", "1", "Eng"]));
    }
}
