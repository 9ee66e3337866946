//! Rendering of the visible row window.
//!
//! This module provides:
//! - Frame construction for the current window (target independent)
//! - Selection overlay geometry
//! - The `RenderBackend` trait and a DOM backend on wasm32

pub mod backend;
#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod frame;
pub mod selection;

pub use backend::{RecordingBackend, RenderBackend};
#[cfg(target_arch = "wasm32")]
pub use dom::DomRenderer;
pub use frame::{
    build_frame, CellRenderData, FrameParams, HeaderRenderData, RenderFrame, RowRenderData,
};
pub use selection::{selection_rect, SelectionRect};

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
    use crate::dataset::Dataset;
    use crate::layout::{ColumnLayout, Viewport};
    use crate::types::{Column, ColumnKind, Row};

    #[test]
    fn test_frame_formats_numbers_and_windows_rows() {
        let columns = vec![
            Column::new("Name", ColumnKind::Text, 100.0),
            Column::new("Amount", ColumnKind::Integer, 80.0),
        ];
        let mut ds = Dataset::new();
        for i in 0..40 {
            let cells = vec![
                ColumnKind::Text.coerce(0, "1234", "%m-%d-%Y").unwrap(),
                ColumnKind::Integer
                    .coerce(1, &(1_000_000 + i).to_string(), "%m-%d-%Y")
                    .unwrap(),
            ];
            ds.push(Row::new(cells), true);
        }
        let layout = ColumnLayout::new(columns.iter().map(|c| c.width), 0.0);
        let viewport = Viewport::new(&GridConfig::with_viewport(300.0, 200.0));

        let frame = build_frame(FrameParams {
            columns: &columns,
            dataset: &ds,
            layout: &layout,
            viewport: &viewport,
            selection: None,
            summaries: vec![],
        });

        assert_eq!(frame.window, 0..16);
        assert_eq!(frame.row_count(), 16);
        assert_eq!(frame.content_height, 960.0);
        let first = &frame.rows[0].cells;
        assert_eq!(first[0].text, "1234");
        assert!(!first[0].numeric);
        assert_eq!(first[1].text, "1,000,000");
        assert_eq!(first[1].left, 100.0);
        assert_eq!(frame.rows[15].top, 360.0);
        assert!(frame.selection.is_none());
    }
}
