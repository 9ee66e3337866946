//! Dual-tier row storage.
//!
//! `all` owns every row in insertion order. `rendered` holds indices into
//! `all`, kept strictly ascending, so it is always a subsequence of `all` in
//! the same relative order.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::types::{Cell, Row};

/// Which collection a row index addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Scope {
    All,
    Rendered,
}

impl Scope {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Rendered => "rendered",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    all: Vec<Row>,
    rendered: Vec<usize>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self, scope: Scope) -> usize {
        match scope {
            Scope::All => self.all.len(),
            Scope::Rendered => self.rendered.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Index into `all` for a row addressed in `scope`.
    pub fn resolve(&self, scope: Scope, row: usize) -> Result<usize> {
        let index = match scope {
            Scope::All => (row < self.all.len()).then_some(row),
            Scope::Rendered => self.rendered.get(row).copied(),
        };
        index.ok_or(GridError::NoSuchRow { row })
    }

    pub fn row(&self, scope: Scope, row: usize) -> Option<&Row> {
        let index = self.resolve(scope, row).ok()?;
        self.all.get(index)
    }

    pub(crate) fn row_mut(&mut self, scope: Scope, row: usize) -> Option<&mut Row> {
        let index = self.resolve(scope, row).ok()?;
        self.all.get_mut(index)
    }

    pub fn cell(&self, scope: Scope, row: usize, column: usize) -> Option<&Cell> {
        self.row(scope, row)?.cell(column)
    }

    pub fn text_at(&self, scope: Scope, row: usize, column: usize) -> Option<&str> {
        self.cell(scope, row, column).map(Cell::text)
    }

    pub fn all_rows(&self) -> &[Row] {
        &self.all
    }

    pub(crate) fn all_rows_mut(&mut self) -> &mut [Row] {
        &mut self.all
    }

    /// Rendered rows in display order.
    pub fn rendered_rows(&self) -> impl Iterator<Item = &Row> {
        self.rendered.iter().filter_map(|&i| self.all.get(i))
    }

    pub fn rendered_indices(&self) -> &[usize] {
        &self.rendered
    }

    /// True if no row is hidden by a filter.
    pub fn is_unfiltered(&self) -> bool {
        self.rendered.len() == self.all.len()
    }

    /// Append a row to `all`, and to `rendered` if `visible`.
    pub(crate) fn push(&mut self, row: Row, visible: bool) {
        let index = self.all.len();
        self.all.push(row);
        if visible {
            self.rendered.push(index);
        }
    }

    /// Insert an `all` index into `rendered` at its order-preserving spot.
    /// Returns the rendered position, or `None` if it was already there.
    pub(crate) fn insert_rendered(&mut self, index: usize) -> Option<usize> {
        let pos = self.rendered.binary_search(&index).err()?;
        self.rendered.insert(pos, index);
        Some(pos)
    }

    pub(crate) fn set_rendered(&mut self, indices: Vec<usize>) {
        debug_assert!(indices.windows(2).all(|w| matches!(w, [a, b] if a < b)));
        self.rendered = indices;
    }

    pub(crate) fn clear(&mut self) {
        self.all.clear();
        self.rendered.clear();
    }

    /// Move a row within `all`. Only permitted while nothing is filtered
    /// out, since `rendered` is rebuilt as the identity afterwards.
    pub(crate) fn move_row(&mut self, from: usize, to: usize) -> Result<()> {
        if from >= self.all.len() {
            return Err(GridError::NoSuchRow { row: from });
        }
        if to >= self.all.len() {
            return Err(GridError::NoSuchRow { row: to });
        }
        let row = self.all.remove(from);
        self.all.insert(to, row);
        self.rendered = (0..self.all.len()).collect();
        Ok(())
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
    use crate::types::ColumnKind;

    fn row(text: &str) -> Row {
        Row::new(vec![ColumnKind::Text.coerce(0, text, "%m-%d-%Y").unwrap()])
    }

    #[test]
    fn test_rendered_stays_ordered_subsequence() {
        let mut ds = Dataset::new();
        ds.push(row("a"), true);
        ds.push(row("b"), false);
        ds.push(row("c"), true);
        assert_eq!(ds.rendered_indices(), &[0, 2]);

        assert_eq!(ds.insert_rendered(1), Some(1));
        assert_eq!(ds.insert_rendered(1), None);
        assert_eq!(ds.rendered_indices(), &[0, 1, 2]);
    }

    #[test]
    fn test_resolve_by_scope() {
        let mut ds = Dataset::new();
        ds.push(row("a"), false);
        ds.push(row("b"), true);
        assert_eq!(ds.text_at(Scope::Rendered, 0, 0), Some("b"));
        assert_eq!(ds.text_at(Scope::All, 0, 0), Some("a"));
        assert!(ds.resolve(Scope::Rendered, 1).is_err());
    }

    #[test]
    fn test_move_row() {
        let mut ds = Dataset::new();
        for t in ["a", "b", "c"] {
            ds.push(row(t), true);
        }
        ds.move_row(0, 2).unwrap();
        let texts: Vec<_> = ds.rendered_rows().map(|r| r.text(0)).collect();
        assert_eq!(texts, ["b", "c", "a"]);
        assert!(ds.move_row(3, 0).is_err());
    }
}
