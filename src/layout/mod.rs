//! Layout engine for the row window and column geometry.
//!
//! This module handles:
//! - The virtualized row window (first visible row, overscan, re-render levels)
//! - Scroll clamping and minimal auto-scroll
//! - Column positions and hit testing

mod column_layout;
mod viewport;

pub use column_layout::ColumnLayout;
pub use viewport::Viewport;
