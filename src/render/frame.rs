//! Visible-window frame construction.
//!
//! A frame is everything a painter needs for one render: the header, the
//! rows of the current window with display-formatted cells, the selection
//! box and the summaries. Building it touches only the window's rows.

use std::ops::Range;

use serde::Serialize;

use super::selection::{selection_rect, SelectionRect};
use crate::dataset::{Dataset, Scope};
use crate::layout::{ColumnLayout, Viewport};
use crate::summary::ColumnSummary;
use crate::types::{CellRange, Column};

/// Data needed to paint a single cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRenderData {
    /// Index into the rendered rows.
    pub row: usize,
    pub col: usize,
    pub left: f64,
    pub width: f64,
    /// Display text (numbers grouped with thousands separators).
    pub text: String,
    /// Inline style overlay.
    pub style: String,
    pub numeric: bool,
    /// Column or cell is read-only.
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowRenderData {
    pub index: usize,
    pub top: f64,
    pub cells: Vec<CellRenderData>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderRenderData {
    pub col: usize,
    pub name: String,
    pub left: f64,
    pub width: f64,
    /// Shows the filter opener.
    pub filterable: bool,
    /// Filter currently narrows the rows.
    pub filtered: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderFrame {
    pub window: Range<usize>,
    pub row_height: f64,
    /// Full scrollable height of the rendered rows.
    pub content_height: f64,
    pub content_width: f64,
    /// Width of the drag-handle gutter (0 when rows are not draggable).
    pub row_header_width: f64,
    pub headers: Vec<HeaderRenderData>,
    pub rows: Vec<RowRenderData>,
    pub selection: Option<SelectionRect>,
    pub summaries: Vec<ColumnSummary>,
}

impl RenderFrame {
    pub fn cells(&self) -> impl Iterator<Item = &CellRenderData> {
        self.rows.iter().flat_map(|r| r.cells.iter())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Inputs for [`build_frame`].
pub struct FrameParams<'a> {
    pub columns: &'a [Column],
    pub dataset: &'a Dataset,
    pub layout: &'a ColumnLayout,
    pub viewport: &'a Viewport,
    pub selection: Option<CellRange>,
    pub summaries: Vec<ColumnSummary>,
}

pub fn build_frame(params: FrameParams<'_>) -> RenderFrame {
    let FrameParams {
        columns,
        dataset,
        layout,
        viewport,
        selection,
        summaries,
    } = params;
    let row_count = dataset.len(Scope::Rendered);
    let window = viewport.window(row_count);

    let headers = columns
        .iter()
        .enumerate()
        .map(|(col, c)| HeaderRenderData {
            col,
            name: c.name.clone(),
            left: layout.left(col).unwrap_or_default(),
            width: c.width,
            filterable: c.filter.is_some(),
            filtered: c.is_filter_active(),
        })
        .collect();

    let rows = window
        .clone()
        .filter_map(|index| {
            let row = dataset.row(Scope::Rendered, index)?;
            let cells = columns
                .iter()
                .enumerate()
                .map(|(col, column)| {
                    let cell = row.cell(col);
                    CellRenderData {
                        row: index,
                        col,
                        left: layout.left(col).unwrap_or_default(),
                        width: column.width,
                        text: column.kind.display(cell.map_or("", |c| c.text())),
                        style: cell.map(|c| c.style.clone()).unwrap_or_default(),
                        numeric: column.kind.is_numeric(),
                        disabled: column.disabled || cell.is_some_and(|c| c.disabled),
                    }
                })
                .collect();
            Some(RowRenderData {
                index,
                top: viewport.row_top(index),
                cells,
            })
        })
        .collect();

    let selection = selection.and_then(|r| selection_rect(r, &window, layout, viewport));

    RenderFrame {
        row_height: viewport.row_height(),
        content_height: viewport.content_height(row_count),
        content_width: layout.total_width(),
        row_header_width: layout.offset(),
        headers,
        rows,
        selection,
        summaries,
        window,
    }
}
