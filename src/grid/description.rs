//! Whole-grid descriptions loaded from JSON.
//!
//! ```json
//! {
//!   "config": { "viewportHeight": 300 },
//!   "columns": [{ "name": "Age", "kind": { "type": "integer" }, "filterable": true }],
//!   "rows": [["30"], ["25"]]
//! }
//! ```

use serde::Deserialize;
use tracing::{debug, warn};

use super::Grid;
use crate::config::GridConfig;
use crate::error::{GridError, Result};
use crate::types::{Column, ColumnSpec};

/// Columns and raw rows of a grid, plus optional config overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridDescription {
    #[serde(default)]
    pub config: GridConfig,
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

impl GridDescription {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| GridError::Config(e.to_string()))
    }

    /// Build the grid. Rows the columns reject are skipped; their count is
    /// returned alongside the grid.
    pub fn build(self) -> Result<(Grid, usize)> {
        let mut grid = Grid::new(self.config)?;
        for spec in self.columns {
            grid.add_column(Column::from(spec))?;
        }
        let mut rejected = 0;
        for (index, row) in self.rows.iter().enumerate() {
            if let Err(e) = grid.try_add_row(row.as_slice()) {
                warn!(row = index, error = %e, "row skipped");
                rejected += 1;
            }
        }
        debug!(
            columns = grid.column_count(),
            rows = grid.row_count(crate::dataset::Scope::All),
            rejected,
            "grid loaded"
        );
        Ok((grid, rejected))
    }
}

impl Grid {
    /// Index of the column with this name, or the column at this index.
    pub fn find_column(&self, key: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name == key)
            .or_else(|| key.parse().ok().filter(|&i: &usize| i < self.columns.len()))
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
    use crate::dataset::Scope;

    const PEOPLE: &str = r#"{
        "config": { "rowHeight": 20 },
        "columns": [
            { "name": "Name", "kind": { "type": "text" } },
            { "name": "Age", "kind": { "type": "integer" }, "filterable": true, "summary": true }
        ],
        "rows": [["A", "30"], ["B", "x"], ["C", "40"]]
    }"#;

    #[test]
    fn test_build_skips_rejected_rows() {
        let (grid, rejected) = GridDescription::from_json(PEOPLE).unwrap().build().unwrap();
        assert_eq!(rejected, 1);
        assert_eq!(grid.row_count(Scope::All), 2);
        assert_eq!(grid.config().row_height, 20.0);
        assert_eq!(grid.summaries()[0].total, "70");
    }

    #[test]
    fn test_find_column_by_name_or_index() {
        let (grid, _) = GridDescription::from_json(PEOPLE).unwrap().build().unwrap();
        assert_eq!(grid.find_column("Age"), Some(1));
        assert_eq!(grid.find_column("0"), Some(0));
        assert_eq!(grid.find_column("2"), None);
        assert_eq!(grid.find_column("Dept"), None);
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        assert!(matches!(
            GridDescription::from_json("{\"rows\": []}"),
            Err(GridError::Config(_))
        ));
    }
}
