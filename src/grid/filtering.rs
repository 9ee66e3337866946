//! Filter panel protocol: open, adjust, commit or cancel.

use tracing::debug;

use super::Grid;
use crate::dataset::Scope;
use crate::error::{GridError, Result};
use crate::filter::{self, FilterCommit, FilterPanel};
use crate::types::{Column, Filter};

impl Grid {
    fn filter_mut(&mut self, column: usize) -> Result<&mut Filter> {
        self.columns
            .get_mut(column)
            .ok_or(GridError::NoSuchColumn { column })?
            .filter
            .as_mut()
            .ok_or(GridError::ColumnNotFilterable(column))
    }

    /// Recompute a column's possible values across the other active
    /// filters. An inactive column has its selection reset to all of them.
    fn prepare_filter(&mut self, column: usize) -> Result<&mut Filter> {
        self.filter_mut(column)?;
        let possible = filter::possible_values(
            &self.columns,
            &self.dataset,
            column,
            &self.config.date_format,
        );
        let f = self.filter_mut(column)?;
        f.possible_values = possible;
        if !f.is_filtered {
            f.reset();
        }
        f.previous_selected = f.selected_values.clone();
        Ok(f)
    }

    /// Open the filter panel of a filterable column, replacing any panel
    /// already open.
    pub fn open_filter(&mut self, column: usize) -> Result<&FilterPanel> {
        let any_filtered = self.columns.iter().any(Column::is_filter_active);
        let f = self.prepare_filter(column)?;
        let panel = FilterPanel::open(
            column,
            &f.possible_values,
            f.previous_selected.clone(),
            |v| f.accepts(v),
            any_filtered,
        );
        debug!(column, values = f.possible_values.len(), "filter panel opened");
        Ok(self.panel.insert(panel))
    }

    pub fn filter_panel(&self) -> Option<&FilterPanel> {
        self.panel.as_ref()
    }

    /// Panel toggles (search, select all, items) go through here.
    pub fn filter_panel_mut(&mut self) -> Option<&mut FilterPanel> {
        self.panel.as_mut()
    }

    /// Close the panel without touching any filter.
    pub fn cancel_filter(&mut self) -> bool {
        self.panel.take().is_some()
    }

    /// Commit the open panel's selection. Returns false if no panel is open.
    pub fn commit_filter(&mut self) -> bool {
        let Some(panel) = self.panel.take() else {
            return false;
        };
        self.apply_commit(panel.commit()).is_ok()
    }

    /// The "clear all filters" action: every filter selects all of its
    /// values and none narrows the rows.
    pub fn clear_all_filters(&mut self) -> bool {
        self.panel = None;
        self.apply_commit(FilterCommit::ClearAll).is_ok()
    }

    /// Select `values` on a column without going through the panel.
    /// Returns the new rendered row count.
    pub fn apply_filter<S: AsRef<str>>(&mut self, column: usize, values: &[S]) -> Result<usize> {
        self.prepare_filter(column)?;
        self.apply_commit(FilterCommit::Select {
            column,
            values: values.iter().map(|v| v.as_ref().to_string()).collect(),
        })
    }

    pub fn is_column_filtered(&self, column: usize) -> bool {
        self.columns.get(column).is_some_and(Column::is_filter_active)
    }

    fn apply_commit(&mut self, commit: FilterCommit) -> Result<usize> {
        match commit {
            FilterCommit::Select { column, values } => {
                let f = self.filter_mut(column)?;
                f.set_selected(values);
                f.refresh_active();
            }
            FilterCommit::ClearAll => {
                for f in self.columns.iter_mut().filter_map(|c| c.filter.as_mut()) {
                    f.reset();
                }
            }
        }

        self.editor.cancel();
        let rendered = filter::rebuild_rendered(&self.columns, &mut self.dataset);
        debug!(
            rendered,
            total = self.dataset.len(Scope::All),
            active = ?filter::active_columns(&self.columns),
            "filter committed"
        );
        self.refresh_data();
        Ok(rendered)
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

    fn names(grid: &Grid) -> Vec<String> {
        grid.dataset()
            .rendered_rows()
            .map(|r| r.text(0).to_string())
            .collect()
    }

    #[test]
    fn test_panel_lists_sorted_possible_values() {
        let mut grid = people();
        let panel = grid.open_filter(1).unwrap();
        let values: Vec<_> = panel.visible_items().map(|i| i.value.as_str()).collect();
        assert_eq!(values, ["25", "30", "40"]);
        assert!(panel.select_all_checked());
        assert!(!panel.clear_all_enabled());
    }

    #[test]
    fn test_panel_commit_narrows_rows() {
        let mut grid = people();
        grid.open_filter(2).unwrap();
        grid.filter_panel_mut().unwrap().toggle_item("Sales");
        assert!(grid.commit_filter());
        assert!(grid.filter_panel().is_none());
        assert_eq!(names(&grid), ["A", "C"]);
        assert!(grid.is_column_filtered(2));
    }

    #[test]
    fn test_non_filterable_column_refused() {
        let mut grid = people();
        assert!(matches!(
            grid.open_filter(0),
            Err(GridError::ColumnNotFilterable(0))
        ));
        assert!(matches!(
            grid.open_filter(9),
            Err(GridError::NoSuchColumn { column: 9 })
        ));
    }

    #[test]
    fn test_possible_values_ignore_own_filter() {
        let mut grid = people();
        grid.apply_filter(2, &["Eng"]).unwrap();
        grid.apply_filter(1, &["30"]).unwrap();
        assert_eq!(names(&grid), ["A"]);

        // Dept sees the ages allowed by the Age filter only.
        let panel = grid.open_filter(2).unwrap();
        let values: Vec<_> = panel.visible_items().map(|i| i.value.as_str()).collect();
        assert_eq!(values, ["Eng"]);
        assert!(panel.clear_all_enabled());
        grid.cancel_filter();

        // Age sees every age reachable under Dept = Eng.
        let panel = grid.open_filter(1).unwrap();
        let values: Vec<_> = panel.visible_items().map(|i| i.value.as_str()).collect();
        assert_eq!(values, ["30", "40"]);
        let checked: Vec<_> = panel.visible_items().map(|i| i.checked).collect();
        assert_eq!(checked, [true, false]);
    }

    #[test]
    fn test_clear_all_restores_everything() {
        let mut grid = people();
        grid.apply_filter(2, &["Sales"]).unwrap();
        assert_eq!(names(&grid), ["B"]);
        assert!(grid.clear_all_filters());
        assert_eq!(names(&grid), ["A", "B", "C"]);
        assert!(!grid.is_column_filtered(2));
    }

    #[test]
    fn test_selecting_everything_is_inactive() {
        let mut grid = people();
        grid.apply_filter(2, &["eng", "SALES"]).unwrap();
        assert!(!grid.is_column_filtered(2));
        assert_eq!(grid.row_count(Scope::Rendered), 3);
    }

    #[test]
    fn test_search_include_adds_to_previous_selection() {
        let mut grid = people();
        grid.apply_filter(1, &["30"]).unwrap();
        grid.open_filter(1).unwrap();
        let panel = grid.filter_panel_mut().unwrap();
        panel.set_search("4");
        panel.toggle_include_current();
        grid.commit_filter();
        assert_eq!(names(&grid), ["A", "C"]);
    }

    #[test]
    fn test_commit_cancels_edit() {
        let mut grid = people();
        grid.start_cell_edit(0, 0);
        grid.apply_filter(2, &["Eng"]).unwrap();
        assert!(grid.edit_session().is_none());
    }
}
