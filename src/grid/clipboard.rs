use tracing::debug;

use super::Grid;
use crate::clipboard::{copy_text, parse_paste};
use crate::dataset::Scope;
use crate::types::CellRange;

impl Grid {
    /// Text for the system clipboard, or `None` without a selection.
    pub fn copy_selection(&self) -> Option<String> {
        let range = self.selection.range()?;
        Some(copy_text(&self.dataset, range))
    }

    /// Every rendered row in clipboard format, empty when nothing is shown.
    pub fn rendered_text(&self) -> String {
        let rows = self.dataset.len(Scope::Rendered);
        let cols = self.columns.len();
        if rows == 0 || cols == 0 {
            return String::new();
        }
        copy_text(&self.dataset, CellRange::new(0, 0, rows - 1, cols - 1))
    }

    /// Write pasted text starting at the selection's top-left cell.
    ///
    /// Cells falling outside the grid, in disabled columns or disabled
    /// cells are skipped, as is any value its column rejects. Renders once
    /// at the end. Returns the number of cells changed.
    pub fn paste(&mut self, text: &str) -> usize {
        let Some(range) = self.selection.range() else {
            return 0;
        };
        let (top, left, _, _) = range.bounds();
        let rows = self.dataset.len(Scope::Rendered);

        let mut changed = 0;
        for (line_offset, values) in parse_paste(text).iter().enumerate() {
            let row = top + line_offset;
            if row >= rows {
                break;
            }
            for (cell_offset, value) in values.iter().enumerate() {
                let col = left + cell_offset;
                if !self.is_cell_editable(row, col) {
                    continue;
                }
                match self.write_cell(row, col, value, Scope::Rendered, false) {
                    Ok(true) => changed += 1,
                    Ok(false) => {}
                    Err(e) => debug!(row, col, error = %e, "pasted value rejected"),
                }
            }
        }
        if changed > 0 {
            self.refresh_data();
        }
        changed
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
    use crate::dataset::Scope;
    use crate::types::CellRange;

    #[test]
    fn test_copy_filtered_ages() {
        let mut grid = people();
        grid.apply_filter(2, &["Eng"]).unwrap();
        grid.select_cells(CellRange::new(0, 1, 1, 1));
        assert_eq!(grid.copy_selection().unwrap(), "30\r\n40\r\n");
    }

    #[test]
    fn test_paste_renders_once() {
        let mut grid = people();
        grid.select_cells(CellRange::cell(0, 0));
        let renders = grid.render_count();
        assert_eq!(grid.paste("X\t50\r\nY\tbad\r\n"), 3);
        assert_eq!(grid.render_count(), renders + 1);
        assert_eq!(grid.text_at(Scope::All, 0, 0), Some("X"));
        assert_eq!(grid.text_at(Scope::All, 0, 1), Some("50"));
        assert_eq!(grid.text_at(Scope::All, 1, 0), Some("Y"));
        assert_eq!(grid.text_at(Scope::All, 1, 1), Some("25"));
    }

    #[test]
    fn test_paste_clips_at_edges() {
        let mut grid = people();
        grid.select_cells(CellRange::cell(2, 2));
        assert_eq!(grid.paste("Sales\textra\nEng\n"), 1);
        assert_eq!(grid.text_at(Scope::All, 2, 2), Some("Sales"));
    }

    #[test]
    fn test_rendered_text_follows_filters() {
        let mut grid = people();
        grid.apply_filter(2, &["Sales"]).unwrap();
        assert_eq!(grid.rendered_text(), "B\t25\tSales\r\n");
        grid.apply_filter(1, &["1"]).unwrap();
        assert_eq!(grid.rendered_text(), "");
    }

    #[test]
    fn test_paste_without_selection_is_ignored() {
        let mut grid = people();
        assert_eq!(grid.paste("Q"), 0);
    }
}
