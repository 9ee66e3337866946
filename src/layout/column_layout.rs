//! Horizontal geometry: cumulative column positions and hit testing.

/// Column x-positions, offset by the drag-handle gutter when rows are
/// draggable.
#[derive(Debug, Clone, Default)]
pub struct ColumnLayout {
    /// `positions[i]` = x of column i's left edge.
    positions: Vec<f64>,
    widths: Vec<f64>,
    offset: f64,
}

impl ColumnLayout {
    pub fn new(widths: impl IntoIterator<Item = f64>, offset: f64) -> Self {
        let widths: Vec<f64> = widths.into_iter().collect();
        let mut positions = Vec::with_capacity(widths.len());
        let mut x = offset;
        for w in &widths {
            positions.push(x);
            x += w;
        }
        Self {
            positions,
            widths,
            offset,
        }
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    pub fn left(&self, col: usize) -> Option<f64> {
        self.positions.get(col).copied()
    }

    pub fn width(&self, col: usize) -> Option<f64> {
        self.widths.get(col).copied()
    }

    /// Width of the gutter before the first column.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn total_width(&self) -> f64 {
        self.offset + self.widths.iter().sum::<f64>()
    }

    /// Column under content x (binary search). `None` over the gutter or
    /// past the last column.
    pub fn col_at_x(&self, x: f64) -> Option<usize> {
        if self.positions.is_empty() || x < self.offset || x >= self.total_width() {
            return None;
        }
        match self
            .positions
            .binary_search_by(|pos| pos.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Equal))
        {
            Ok(i) => Some(i),
            Err(i) => Some(i.saturating_sub(1)),
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

    #[test]
    fn test_positions_include_gutter() {
        let layout = ColumnLayout::new([100.0, 60.0, 80.0], 28.0);
        assert_eq!(layout.left(0), Some(28.0));
        assert_eq!(layout.left(2), Some(188.0));
        assert_eq!(layout.total_width(), 268.0);
    }

    #[test]
    fn test_col_at_x() {
        let layout = ColumnLayout::new([100.0, 60.0, 80.0], 0.0);
        assert_eq!(layout.col_at_x(0.0), Some(0));
        assert_eq!(layout.col_at_x(99.9), Some(0));
        assert_eq!(layout.col_at_x(100.0), Some(1));
        assert_eq!(layout.col_at_x(239.0), Some(2));
        assert_eq!(layout.col_at_x(240.0), None);

        let gutter = ColumnLayout::new([100.0], 28.0);
        assert_eq!(gutter.col_at_x(10.0), None);
    }
}
