use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Typed value of a cell. The variant always matches the owning column's kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum CellValue {
    Text(String),
    Integer(i64),
    /// Already rounded to two decimals.
    Float(f64),
    /// Label of the selected option.
    Choice(String),
    /// `None` for an empty date cell.
    Date(Option<NaiveDate>),
}

impl CellValue {
    /// Numeric view used by summaries. Non-numeric values have none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => {
                #[allow(clippy::cast_precision_loss)]
                let f = *i as f64;
                Some(f)
            }
            Self::Float(f) => Some(*f),
            Self::Text(_) | Self::Choice(_) | Self::Date(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

/// A single grid cell: the typed value and its string encoding, plus a
/// free-form style overlay.
///
/// Value and text are private and only replaced together, so the two
/// encodings cannot drift apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    value: CellValue,
    text: String,
    /// Inline CSS applied when the cell is painted.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub style: String,
    /// Per-cell read-only flag (on top of the column's flag).
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

impl Cell {
    pub(crate) fn new(value: CellValue, text: String) -> Self {
        Self {
            value,
            text,
            style: String::new(),
            disabled: false,
        }
    }

    pub fn value(&self) -> &CellValue {
        &self.value
    }

    /// String encoding used for display, filtering and the clipboard.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace both encodings from a freshly coerced cell, keeping the
    /// style overlay and disabled flag.
    pub(crate) fn assign(&mut self, coerced: Cell) {
        self.value = coerced.value;
        self.text = coerced.text;
    }
}
