//! Selection overlay geometry.
//!
//! Computed from row and column positions rather than from painted cells,
//! so it stays correct when corner cells are virtualized away.

use std::ops::Range;

use serde::Serialize;

use crate::layout::{ColumnLayout, Viewport};
use crate::types::CellRange;

/// Selection box in body content coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SelectionRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Box covering the part of `range` inside the rendered `window`.
///
/// Returns `None` when no selected row is rendered, so the indicator is
/// hidden instead of drawn against rows that do not exist on screen.
pub fn selection_rect(
    range: CellRange,
    window: &Range<usize>,
    columns: &ColumnLayout,
    viewport: &Viewport,
) -> Option<SelectionRect> {
    let (r0, c0, r1, c1) = range.bounds();
    let first = r0.max(window.start);
    let last = r1.min(window.end.checked_sub(1)?);
    if first > last {
        return None;
    }

    let x = columns.left(c0)?;
    let right = columns.left(c1)? + columns.width(c1)?;
    let y = viewport.row_top(first);
    let bottom = viewport.row_top(last) + viewport.row_height();
    Some(SelectionRect {
        x,
        y,
        w: right - x,
        h: bottom - y,
    })
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
    use crate::config::GridConfig;

    fn fixtures() -> (ColumnLayout, Viewport) {
        (
            ColumnLayout::new([100.0, 50.0, 50.0], 0.0),
            Viewport::new(&GridConfig::with_viewport(200.0, 200.0)),
        )
    }

    #[test]
    fn test_rect_for_visible_range() {
        let (cols, vp) = fixtures();
        let rect = selection_rect(CellRange::new(2, 2, 1, 1), &(0..16), &cols, &vp).unwrap();
        assert_eq!(
            rect,
            SelectionRect {
                x: 100.0,
                y: 24.0,
                w: 100.0,
                h: 48.0
            }
        );
    }

    #[test]
    fn test_rect_clipped_to_window() {
        let (cols, vp) = fixtures();
        let rect = selection_rect(CellRange::new(0, 0, 100, 0), &(10..26), &cols, &vp).unwrap();
        assert_eq!(rect.y, 240.0);
        assert_eq!(rect.h, 16.0 * 24.0);
    }

    #[test]
    fn test_hidden_outside_window() {
        let (cols, vp) = fixtures();
        assert!(selection_rect(CellRange::cell(40, 0), &(0..16), &cols, &vp).is_none());
        assert!(selection_rect(CellRange::cell(0, 0), &(0..0), &cols, &vp).is_none());
    }
}
