//! Structured error types for xlgrid.
//!
//! The public grid surface swallows these (a rejected write is a silent
//! no-op), but every internal operation reports why it did nothing.

/// All errors that can occur while mutating or configuring a grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// A row was supplied with the wrong number of values.
    #[error("Row arity mismatch: expected {expected} values, got {got}")]
    Arity { expected: usize, got: usize },

    /// A value could not be coerced into the column's kind.
    #[error("Cannot coerce {value:?} into {kind} column {column}")]
    Coerce {
        column: usize,
        kind: &'static str,
        value: String,
    },

    /// Row index outside the addressed collection.
    #[error("No such row: {row}")]
    NoSuchRow { row: usize },

    /// Column index outside the registered columns.
    #[error("No such column: {column}")]
    NoSuchColumn { column: usize },

    /// Filter operation on a column registered without a filter.
    #[error("Column {0} is not filterable")]
    ColumnNotFilterable(usize),

    /// Invalid grid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// DOM setup failure (wasm only).
    #[error("DOM error: {0}")]
    Dom(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
