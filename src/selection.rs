//! Range selection state machine.
//!
//! `idle -> selecting -> idle`: pointer-down anchors a range, pointer moves
//! extend its end while selecting, pointer-up leaves the range in place.
//! Keyboard moves either collapse to a cell next to the anchor or, when
//! extending, move only the end. Every index is clamped to the rendered
//! bounds.

use crate::types::CellRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// (row delta, column delta)
    pub fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

fn step(index: usize, delta: isize, len: usize) -> usize {
    index
        .saturating_add_signed(delta)
        .min(len.saturating_sub(1))
}

fn clamp(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    range: Option<CellRange>,
    selecting: bool,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn range(&self) -> Option<CellRange> {
        self.range
    }

    /// True between pointer-down and pointer-up.
    pub fn is_selecting(&self) -> bool {
        self.selecting
    }

    /// Anchor a new range at the pressed cell and start selecting.
    pub fn pointer_down(&mut self, row: usize, col: usize, rows: usize, cols: usize) -> bool {
        if rows == 0 || cols == 0 {
            return false;
        }
        self.selecting = true;
        self.set(CellRange::cell(clamp(row, rows), clamp(col, cols)))
    }

    /// Extend the end to the hovered cell. Ignored unless selecting.
    pub fn pointer_move(&mut self, row: usize, col: usize, rows: usize, cols: usize) -> bool {
        if !self.selecting || rows == 0 || cols == 0 {
            return false;
        }
        let Some(mut range) = self.range else {
            return false;
        };
        range.end_row = clamp(row, rows);
        range.end_col = clamp(col, cols);
        self.set(range)
    }

    pub fn pointer_up(&mut self) {
        self.selecting = false;
    }

    /// Keyboard navigation. Without `extend` the range collapses to the
    /// cell adjacent to the anchor; with it only the end moves.
    pub fn move_cursor(
        &mut self,
        direction: Direction,
        extend: bool,
        rows: usize,
        cols: usize,
    ) -> bool {
        if rows == 0 || cols == 0 {
            return false;
        }
        let Some(range) = self.range else {
            return false;
        };
        let (dr, dc) = direction.delta();
        let next = if extend {
            CellRange {
                end_row: step(range.end_row, dr, rows),
                end_col: step(range.end_col, dc, cols),
                ..range
            }
        } else {
            CellRange::cell(
                step(range.start_row, dr, rows),
                step(range.start_col, dc, cols),
            )
        };
        self.set(next)
    }

    /// Select an explicit range, clamped to bounds.
    pub fn select(&mut self, range: CellRange, rows: usize, cols: usize) -> bool {
        if rows == 0 || cols == 0 {
            return false;
        }
        self.set(CellRange::new(
            clamp(range.start_row, rows),
            clamp(range.start_col, cols),
            clamp(range.end_row, rows),
            clamp(range.end_col, cols),
        ))
    }

    pub fn select_all(&mut self, rows: usize, cols: usize) -> bool {
        self.select(
            CellRange::new(0, 0, rows.saturating_sub(1), cols.saturating_sub(1)),
            rows,
            cols,
        )
    }

    /// Drop the range unless a pointer drag is in progress.
    pub fn clear(&mut self) -> bool {
        if self.selecting {
            return false;
        }
        self.range.take().is_some()
    }

    /// Re-clamp after the rendered dataset changed size.
    pub fn clamp_to(&mut self, rows: usize, cols: usize) {
        if rows == 0 || cols == 0 {
            self.range = None;
            self.selecting = false;
        } else if let Some(range) = self.range {
            self.range = Some(CellRange::new(
                clamp(range.start_row, rows),
                clamp(range.start_col, cols),
                clamp(range.end_row, rows),
                clamp(range.end_col, cols),
            ));
        }
    }

    /// Keep the range on the same rows after a row was inserted into the
    /// rendered rows at `pos`.
    pub fn shift_rows_from(&mut self, pos: usize) {
        if let Some(range) = self.range.as_mut() {
            if range.start_row >= pos {
                range.start_row += 1;
            }
            if range.end_row >= pos {
                range.end_row += 1;
            }
        }
    }

    fn set(&mut self, range: CellRange) -> bool {
        let changed = self.range != Some(range);
        self.range = Some(range);
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
    use super::*;
    use test_case::test_case;

    fn with_range(r: CellRange) -> SelectionModel {
        let mut s = SelectionModel::new();
        s.select(r, 10, 3);
        s
    }

    #[test]
    fn test_extend_moves_only_end() {
        let mut s = with_range(CellRange::new(0, 0, 1, 1));
        assert!(s.move_cursor(Direction::Down, true, 10, 3));
        assert_eq!(s.range(), Some(CellRange::new(0, 0, 2, 1)));
    }

    #[test]
    fn test_plain_move_collapses_next_to_anchor() {
        let mut s = with_range(CellRange::new(0, 0, 1, 1));
        s.move_cursor(Direction::Down, false, 10, 3);
        assert_eq!(s.range(), Some(CellRange::cell(1, 0)));
    }

    #[test_case(Direction::Up, CellRange::cell(0, 0); "up at top")]
    #[test_case(Direction::Left, CellRange::cell(0, 0); "left at edge")]
    fn test_moves_clamp_at_bounds(dir: Direction, expected: CellRange) {
        let mut s = with_range(CellRange::cell(0, 0));
        assert!(!s.move_cursor(dir, false, 10, 3));
        assert_eq!(s.range(), Some(expected));
    }

    #[test]
    fn test_moves_clamp_at_far_edge() {
        let mut s = with_range(CellRange::cell(9, 2));
        s.move_cursor(Direction::Down, true, 10, 3);
        s.move_cursor(Direction::Right, true, 10, 3);
        assert_eq!(s.range(), Some(CellRange::cell(9, 2)));
    }

    #[test]
    fn test_pointer_drag() {
        let mut s = SelectionModel::new();
        s.pointer_down(2, 1, 10, 3);
        assert!(s.is_selecting());
        s.pointer_move(5, 7, 10, 3);
        assert_eq!(s.range(), Some(CellRange::new(2, 1, 5, 2)));

        assert!(!s.clear(), "clear is ignored mid-drag");
        s.pointer_up();
        assert_eq!(s.range(), Some(CellRange::new(2, 1, 5, 2)));

        assert!(!s.pointer_move(0, 0, 10, 3));
        assert!(s.clear());
        assert_eq!(s.range(), None);
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut s = with_range(CellRange::new(1, 0, 8, 2));
        s.clamp_to(4, 3);
        assert_eq!(s.range(), Some(CellRange::new(1, 0, 3, 2)));
        s.clamp_to(0, 3);
        assert_eq!(s.range(), None);
    }

    #[test]
    fn test_shift_after_row_insert() {
        let mut s = with_range(CellRange::new(4, 0, 1, 2));
        s.shift_rows_from(2);
        assert_eq!(s.range(), Some(CellRange::new(5, 0, 1, 2)));
        s.shift_rows_from(0);
        assert_eq!(s.range(), Some(CellRange::new(6, 0, 2, 2)));
    }

    #[test]
    fn test_empty_grid_has_no_selection() {
        let mut s = SelectionModel::new();
        assert!(!s.pointer_down(0, 0, 0, 3));
        assert!(!s.select_all(0, 3));
        assert_eq!(s.range(), None);
    }
}
