//! xlgrid - virtualized, filterable data grid for the web
//!
//! A spreadsheet-like grid compiled to WebAssembly and painted into the DOM:
//! - Typed columns (text, integer, float, choice, date) with coercion on write
//! - Excel-style per-column value filters composed across columns
//! - Only the rows in view are rendered, so large row counts stay cheap
//! - Range selection, keyboard navigation, in-place editing
//! - Tab-separated copy and paste, column totals and subtotals
//! - Row reordering by drag and drop
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { XlGrid } from 'xlgrid';
//! await init();
//! const grid = new XlGrid('grid-host', { viewportHeight: 300 });
//! grid.add_column({ name: 'Name', kind: { type: 'text' }, width: 120 });
//! grid.add_column({ name: 'Age', kind: { type: 'integer' }, filterable: true, summary: true });
//! grid.add_row(['Ada', '36']);
//! ```
//!
//! The engine itself ([`Grid`]) is target independent and can be driven
//! directly from Rust.

pub mod callbacks;
pub mod clipboard;
pub mod config;
pub mod dataset;
pub mod drag;
pub mod editor;
pub mod error;
pub mod filter;
pub mod focus;
pub mod grid;
pub mod layout;
pub mod numfmt;
pub mod option_list;
pub mod render;
pub mod selection;
pub mod summary;
pub mod types;
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use config::GridConfig;
pub use dataset::Scope;
pub use error::{GridError, Result};
pub use grid::{Grid, GridDescription};
pub use viewer::XlGrid;

pub use types::*;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
