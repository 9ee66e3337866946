//! Mutation requests.
//!
//! Popups, resize handles and host calls describe the change they want as a
//! `MutationRequest`; the grid engine is the only thing that applies it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "camelCase")]
pub enum Mutation {
    /// Write a raw value through the column's coercion.
    SetValue(String),
    /// Replace the cell's inline style.
    SetStyle(String),
    /// Make the cell read-only.
    Disable,
    Enable,
    /// Set the column's width. The row is ignored.
    ResizeColumn(f64),
}

/// A change addressed to one cell of the rendered rows (or one column).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationRequest {
    pub row: usize,
    pub column: usize,
    pub mutation: Mutation,
}

impl MutationRequest {
    pub fn new(row: usize, column: usize, mutation: Mutation) -> Self {
        Self {
            row,
            column,
            mutation,
        }
    }

    pub fn resize_column(column: usize, width: f64) -> Self {
        Self::new(0, column, Mutation::ResizeColumn(width))
    }
}
