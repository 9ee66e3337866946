//! Grid configuration.
//!
//! Every field has a default, so hosts only pass the values they want to
//! change (a plain JS object on wasm, converted with `serde-wasm-bindgen`).

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Rows rendered beyond the last fully visible one to hide clipping while scrolling.
pub const DEFAULT_OVERSCAN: usize = 7;

/// Default data row height in pixels.
pub const DEFAULT_ROW_HEIGHT: f64 = 24.0;

/// Default header row height in pixels.
pub const DEFAULT_HEADER_HEIGHT: f64 = 28.0;

/// Geometry and behaviour settings for a grid instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridConfig {
    /// Height of the column header row (and of each summary row).
    pub header_height: f64,
    /// Fixed height of every data row.
    pub row_height: f64,
    /// Width of the drag-handle gutter shown when rows are draggable.
    pub row_header_width: f64,
    /// Extra rows rendered past the viewport.
    pub overscan: usize,
    /// Height of the scrolling surface.
    pub viewport_height: f64,
    /// Width of the scrolling surface.
    pub viewport_width: f64,
    /// Whether rows can be reordered by drag and drop.
    pub draggable_rows: bool,
    /// chrono pattern accepted by date columns.
    pub date_format: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            header_height: DEFAULT_HEADER_HEIGHT,
            row_height: DEFAULT_ROW_HEIGHT,
            row_header_width: 28.0,
            overscan: DEFAULT_OVERSCAN,
            viewport_height: 400.0,
            viewport_width: 800.0,
            draggable_rows: false,
            date_format: "%m-%d-%Y".to_string(),
        }
    }
}

impl GridConfig {
    /// Config with the given viewport size and defaults elsewhere.
    #[must_use]
    pub fn with_viewport(width: f64, height: f64) -> Self {
        Self {
            viewport_width: width,
            viewport_height: height,
            ..Self::default()
        }
    }

    /// Reject geometry the window math cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !self.row_height.is_finite() || self.row_height <= 0.0 {
            return Err(GridError::Config(format!(
                "row height must be positive, got {}",
                self.row_height
            )));
        }
        if !self.header_height.is_finite() || self.header_height < 0.0 {
            return Err(GridError::Config(format!(
                "header height must not be negative, got {}",
                self.header_height
            )));
        }
        if !self.viewport_height.is_finite() || self.viewport_height < 0.0 {
            return Err(GridError::Config(format!(
                "viewport height must not be negative, got {}",
                self.viewport_height
            )));
        }
        if self.date_format.is_empty() {
            return Err(GridError::Config("date format must not be empty".into()));
        }
        Ok(())
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
    fn test_defaults_match_original_geometry() {
        let c = GridConfig::default();
        assert_eq!(c.row_height, 24.0);
        assert_eq!(c.header_height, 28.0);
        assert_eq!(c.overscan, 7);
        assert!(!c.draggable_rows);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let c: GridConfig =
            serde_json::from_str(r#"{"rowHeight": 30, "draggableRows": true}"#).unwrap();
        assert_eq!(c.row_height, 30.0);
        assert!(c.draggable_rows);
        assert_eq!(c.overscan, DEFAULT_OVERSCAN);
    }

    #[test]
    fn test_zero_row_height_rejected() {
        let c = GridConfig {
            row_height: 0.0,
            ..GridConfig::default()
        };
        assert!(c.validate().is_err());
    }
}
