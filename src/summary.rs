//! Column totals and subtotals.
//!
//! `total` sums a column over every row, `subtotal` over the rendered rows
//! only. Integer columns accumulate as `i64`, float columns as `f64`.
//! Inserts update the sums incrementally; anything that can change existing
//! values or the rendered set recomputes them.

use serde::Serialize;

use crate::dataset::Dataset;
use crate::numfmt::{format_float, format_integer};
use crate::types::{CellValue, Column, ColumnKind, Row};

/// Published summary of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSummary {
    pub column: usize,
    pub total: String,
    pub subtotal: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Sum {
    Int(i64),
    Float(f64),
}

impl Sum {
    fn zero(kind: &ColumnKind) -> Self {
        match kind {
            ColumnKind::Integer => Self::Int(0),
            _ => Self::Float(0.0),
        }
    }

    fn add(&mut self, value: &CellValue) {
        match self {
            Self::Int(acc) => {
                if let Some(v) = value.as_i64() {
                    *acc = acc.saturating_add(v);
                }
            }
            Self::Float(acc) => {
                if let Some(v) = value.as_f64() {
                    *acc += v;
                }
            }
        }
    }

    fn format(self) -> String {
        match self {
            Self::Int(i) => format_integer(i),
            Self::Float(f) => format_float(f),
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    column: usize,
    total: Sum,
    subtotal: Sum,
}

/// Running sums for every column flagged to carry a summary.
#[derive(Debug, Clone, Default)]
pub struct SummaryState {
    entries: Vec<Entry>,
}

impl SummaryState {
    /// Recompute every sum from scratch.
    pub fn recompute(&mut self, columns: &[Column], dataset: &Dataset) {
        self.entries = columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.summary)
            .map(|(column, c)| {
                let mut total = Sum::zero(&c.kind);
                let mut subtotal = Sum::zero(&c.kind);
                for cell in dataset.all_rows().iter().filter_map(|r| r.cell(column)) {
                    total.add(cell.value());
                }
                for cell in dataset.rendered_rows().filter_map(|r| r.cell(column)) {
                    subtotal.add(cell.value());
                }
                Entry {
                    column,
                    total,
                    subtotal,
                }
            })
            .collect();
    }

    /// Account for a newly inserted row.
    pub fn add_row(&mut self, row: &Row, visible: bool) {
        for entry in &mut self.entries {
            if let Some(cell) = row.cell(entry.column) {
                entry.total.add(cell.value());
                if visible {
                    entry.subtotal.add(cell.value());
                }
            }
        }
    }

    pub fn published(&self) -> Vec<ColumnSummary> {
        self.entries
            .iter()
            .map(|e| ColumnSummary {
                column: e.column,
                total: e.total.format(),
                subtotal: e.subtotal.format(),
            })
            .collect()
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

    const FMT: &str = "%m-%d-%Y";

    fn columns() -> Vec<Column> {
        vec![
            Column::new("Qty", ColumnKind::Integer, 60.0).with_summary(true),
            Column::new("Price", ColumnKind::Float, 60.0).with_summary(true),
            Column::new("Note", ColumnKind::Text, 60.0),
        ]
    }

    fn row(qty: &str, price: &str) -> Row {
        Row::new(vec![
            ColumnKind::Integer.coerce(0, qty, FMT).unwrap(),
            ColumnKind::Float.coerce(1, price, FMT).unwrap(),
            ColumnKind::Text.coerce(2, "x", FMT).unwrap(),
        ])
    }

    #[test]
    fn test_totals_and_subtotals() {
        let mut ds = Dataset::new();
        ds.push(row("1200", "1000.5"), true);
        ds.push(row("300", "0.25"), false);

        let mut state = SummaryState::default();
        state.recompute(&columns(), &ds);
        assert_eq!(
            state.published(),
            vec![
                ColumnSummary {
                    column: 0,
                    total: "1,500".into(),
                    subtotal: "1,200".into(),
                },
                ColumnSummary {
                    column: 1,
                    total: "1,000.75".into(),
                    subtotal: "1,000.50".into(),
                },
            ]
        );
    }

    #[test]
    fn test_incremental_matches_recompute() {
        let cols = columns();
        let mut ds = Dataset::new();
        let mut incremental = SummaryState::default();
        incremental.recompute(&cols, &ds);
        for (q, p, visible) in [("1", "2.5", true), ("10", "3", false), ("100", "0.5", true)] {
            let r = row(q, p);
            incremental.add_row(&r, visible);
            ds.push(r, visible);
        }
        let mut full = SummaryState::default();
        full.recompute(&cols, &ds);
        assert_eq!(incremental.published(), full.published());
    }

    #[test]
    fn test_empty_dataset_sums_to_zero() {
        let cols = vec![Column::new("Price", ColumnKind::Float, 60.0).with_summary(true)];
        let mut state = SummaryState::default();
        state.recompute(&cols, &Dataset::new());
        let published = state.published();
        assert_eq!(published[0].total, "0.00");
        assert_eq!(published[0].subtotal, "0.00");
    }
}
