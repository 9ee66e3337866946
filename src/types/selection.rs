use serde::Serialize;

/// Rectangular selection over `rendered` indices.
///
/// `start` is the anchor and `end` the cursor. Storage keeps the order the
/// user produced; [`CellRange::bounds`] normalizes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRange {
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

impl CellRange {
    pub fn new(start_row: usize, start_col: usize, end_row: usize, end_col: usize) -> Self {
        Self {
            start_row,
            start_col,
            end_row,
            end_col,
        }
    }

    /// Single-cell range.
    pub fn cell(row: usize, col: usize) -> Self {
        Self::new(row, col, row, col)
    }

    /// Normalized bounds `(min_row, min_col, max_row, max_col)`.
    pub fn bounds(&self) -> (usize, usize, usize, usize) {
        (
            self.start_row.min(self.end_row),
            self.start_col.min(self.end_col),
            self.start_row.max(self.end_row),
            self.start_col.max(self.end_col),
        )
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        let (r0, c0, r1, c1) = self.bounds();
        (r0..=r1).contains(&row) && (c0..=c1).contains(&col)
    }

    pub fn row_count(&self) -> usize {
        self.start_row.abs_diff(self.end_row) + 1
    }

    pub fn col_count(&self) -> usize {
        self.start_col.abs_diff(self.end_col) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_normalize_reversed_drag() {
        let r = CellRange::new(5, 3, 1, 0);
        assert_eq!(r.bounds(), (1, 0, 5, 3));
        assert_eq!(r.row_count(), 5);
        assert_eq!(r.col_count(), 4);
        assert!(r.contains(3, 2));
        assert!(!r.contains(0, 2));
    }
}
