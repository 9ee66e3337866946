use std::collections::BTreeSet;

use super::cell::Cell;

/// An ordered sequence of cells, one per column, plus the set of active
/// filter columns this row currently passes.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub cells: Vec<Cell>,
    /// Indices of active filter columns whose selection accepts this row.
    pub filtered_by: BTreeSet<usize>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            filtered_by: BTreeSet::new(),
        }
    }

    pub fn cell(&self, column: usize) -> Option<&Cell> {
        self.cells.get(column)
    }

    pub fn cell_mut(&mut self, column: usize) -> Option<&mut Cell> {
        self.cells.get_mut(column)
    }

    /// String encoding of a column, empty if out of range.
    pub fn text(&self, column: usize) -> &str {
        self.cell(column).map_or("", Cell::text)
    }

    /// True if every listed column claims this row.
    pub fn passes_all<'a>(&self, columns: impl IntoIterator<Item = &'a usize>) -> bool {
        columns.into_iter().all(|c| self.filtered_by.contains(c))
    }
}
