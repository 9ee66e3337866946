use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::cell::{Cell, CellValue};
use super::filter::Filter;
use crate::error::{GridError, Result};
use crate::numfmt::group_thousands;

/// One entry of a choice column's option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// Text shown to the user and stored in the cell.
    pub label: String,
    /// Host-side value associated with the label.
    pub value: String,
}

impl ChoiceOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Value kind of a column.
///
/// Coercion, ordering and display are all decided here, once per column,
/// instead of at every call site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "options", rename_all = "camelCase")]
pub enum ColumnKind {
    Text,
    Integer,
    Float,
    Choice(Vec<ChoiceOption>),
    Date,
}

impl ColumnKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Choice(_) => "choice",
            Self::Date => "date",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    /// Coerce raw input into a cell for this kind.
    ///
    /// - text: taken as-is
    /// - integer: empty is 0, otherwise a strict integer parse
    /// - float: empty is 0.00, otherwise a finite number rounded to 2 decimals
    /// - choice: must equal one option label exactly (empty fails)
    /// - date: empty, or a date in `date_format` (`/` accepted for `-`)
    pub fn coerce(&self, column: usize, raw: &str, date_format: &str) -> Result<Cell> {
        let fail = || GridError::Coerce {
            column,
            kind: self.name(),
            value: raw.to_string(),
        };

        let cell = match self {
            Self::Text => Cell::new(CellValue::Text(raw.to_string()), raw.to_string()),
            Self::Integer => {
                let trimmed = raw.trim();
                let value = if trimmed.is_empty() {
                    0
                } else {
                    trimmed.parse::<i64>().map_err(|_| fail())?
                };
                Cell::new(CellValue::Integer(value), value.to_string())
            }
            Self::Float => {
                let trimmed = raw.trim();
                let parsed = if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().map_err(|_| fail())?
                };
                if !parsed.is_finite() {
                    return Err(fail());
                }
                // The text is authoritative; the typed value is re-read from it so
                // both encodings carry the same rounding.
                let text = format!("{parsed:.2}");
                let rounded = text.parse::<f64>().map_err(|_| fail())?;
                Cell::new(CellValue::Float(rounded), text)
            }
            Self::Choice(options) => {
                let option = options.iter().find(|o| o.label == raw).ok_or_else(fail)?;
                Cell::new(
                    CellValue::Choice(option.label.clone()),
                    option.label.clone(),
                )
            }
            Self::Date => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    Cell::new(CellValue::Date(None), String::new())
                } else {
                    let date = parse_date(trimmed, date_format).ok_or_else(fail)?;
                    Cell::new(
                        CellValue::Date(Some(date)),
                        date.format(date_format).to_string(),
                    )
                }
            }
        };
        Ok(cell)
    }

    /// Order two string encodings of this kind (used to sort filter values).
    ///
    /// Dates sort chronologically with unparseable/empty values first,
    /// numbers numerically, text and choices lexicographically.
    pub fn compare(&self, a: &str, b: &str, date_format: &str) -> Ordering {
        match self {
            Self::Date => parse_date(a, date_format).cmp(&parse_date(b, date_format)),
            Self::Integer => {
                let x = a.trim().parse::<i64>().unwrap_or(0);
                let y = b.trim().parse::<i64>().unwrap_or(0);
                x.cmp(&y)
            }
            Self::Float => {
                let x = a.trim().parse::<f64>().unwrap_or(0.0);
                let y = b.trim().parse::<f64>().unwrap_or(0.0);
                x.total_cmp(&y)
            }
            Self::Text | Self::Choice(_) => a.cmp(b),
        }
    }

    /// Display string for a cell's text encoding.
    pub fn display(&self, text: &str) -> String {
        if self.is_numeric() {
            group_thousands(text)
        } else {
            text.to_string()
        }
    }

    /// Options of a choice column (empty for other kinds).
    pub fn options(&self) -> &[ChoiceOption] {
        match self {
            Self::Choice(options) => options,
            _ => &[],
        }
    }
}

fn parse_date(text: &str, date_format: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(text, date_format)
        .or_else(|_| NaiveDate::parse_from_str(&text.replace('/', "-"), date_format))
        .ok()
}

/// A registered grid column.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
    /// Width in pixels.
    pub width: f64,
    /// Read-only column.
    pub disabled: bool,
    /// Present iff the column was registered as filterable.
    pub filter: Option<Filter>,
    /// Show total/subtotal (numeric columns only).
    pub summary: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnKind, width: f64) -> Self {
        Self {
            name: name.into(),
            kind,
            width,
            disabled: false,
            filter: None,
            summary: false,
        }
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filter = filterable.then(Filter::default);
        self
    }

    /// Summaries are only kept for integer and float columns.
    #[must_use]
    pub fn with_summary(mut self, summary: bool) -> Self {
        self.summary = summary && self.kind.is_numeric();
        self
    }

    /// True if the column takes part in filter composition right now.
    pub fn is_filter_active(&self) -> bool {
        self.filter.as_ref().is_some_and(|f| f.is_filtered)
    }

    /// Host value for a choice label.
    pub fn value_by_label(&self, label: &str) -> Option<&str> {
        self.kind
            .options()
            .iter()
            .find(|o| o.label == label)
            .map(|o| o.value.as_str())
    }
}

fn default_width() -> f64 {
    100.0
}

/// Serialized column description, as passed by hosts and grid files.
///
/// ```json
/// { "name": "Dept", "kind": { "type": "choice", "options": [{ "label": "Eng", "value": "e" }] },
///   "width": 80, "filterable": true }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub filterable: bool,
    #[serde(default)]
    pub summary: bool,
}

impl From<ColumnSpec> for Column {
    fn from(spec: ColumnSpec) -> Self {
        Column::new(spec.name, spec.kind, spec.width)
            .disabled(spec.disabled)
            .filterable(spec.filterable)
            .with_summary(spec.summary)
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
    use test_case::test_case;

    const FMT: &str = "%m-%d-%Y";

    fn depts() -> ColumnKind {
        ColumnKind::Choice(vec![
            ChoiceOption::new("Eng", "1"),
            ChoiceOption::new("Sales", "2"),
        ])
    }

    #[test_case("7", "7")]
    #[test_case("", "0")]
    #[test_case(" 42 ", "42")]
    #[test_case("-3", "-3")]
    fn test_integer_coercion(raw: &str, text: &str) {
        let cell = ColumnKind::Integer.coerce(0, raw, FMT).unwrap();
        assert_eq!(cell.text(), text);
    }

    #[test_case("abc")]
    #[test_case("3.5")]
    #[test_case("12abc")]
    fn test_integer_rejects(raw: &str) {
        assert!(ColumnKind::Integer.coerce(0, raw, FMT).is_err());
    }

    #[test_case("3", "3.00", 3.0)]
    #[test_case("", "0.00", 0.0)]
    #[test_case("1.005", "1.00", 1.0)]
    #[test_case("2.456", "2.46", 2.46)]
    fn test_float_coercion(raw: &str, text: &str, value: f64) {
        let cell = ColumnKind::Float.coerce(0, raw, FMT).unwrap();
        assert_eq!(cell.text(), text);
        assert_eq!(cell.value(), &CellValue::Float(value));
    }

    #[test_case("x")]
    #[test_case("inf")]
    #[test_case("NaN")]
    fn test_float_rejects(raw: &str) {
        assert!(ColumnKind::Float.coerce(0, raw, FMT).is_err());
    }

    #[test]
    fn test_choice_is_case_sensitive() {
        let kind = depts();
        assert_eq!(kind.coerce(2, "Eng", FMT).unwrap().text(), "Eng");
        assert!(kind.coerce(2, "eng", FMT).is_err());
        assert!(kind.coerce(2, "", FMT).is_err());
    }

    #[test]
    fn test_date_coercion() {
        let cell = ColumnKind::Date.coerce(0, "03-15-2024", FMT).unwrap();
        assert_eq!(
            cell.value(),
            &CellValue::Date(NaiveDate::from_ymd_opt(2024, 3, 15))
        );
        assert_eq!(cell.text(), "03-15-2024");

        let slashed = ColumnKind::Date.coerce(0, "03/15/2024", FMT).unwrap();
        assert_eq!(slashed.text(), "03-15-2024");

        let empty = ColumnKind::Date.coerce(0, "", FMT).unwrap();
        assert_eq!(empty.value(), &CellValue::Date(None));

        assert!(ColumnKind::Date.coerce(0, "2024-03-15", FMT).is_err());
        assert!(ColumnKind::Date.coerce(0, "13-01-2024", FMT).is_err());
    }

    #[test]
    fn test_roundtrip_through_text() {
        for (kind, raw) in [
            (ColumnKind::Integer, "7"),
            (ColumnKind::Float, "3"),
            (ColumnKind::Date, "12-31-1999"),
            (depts(), "Sales"),
        ] {
            let first = kind.coerce(0, raw, FMT).unwrap();
            let second = kind.coerce(0, first.text(), FMT).unwrap();
            assert_eq!(first, second, "{} did not round-trip", kind.name());
        }
    }

    #[test]
    fn test_compare_by_kind() {
        assert_eq!(ColumnKind::Integer.compare("9", "10", FMT), Ordering::Less);
        assert_eq!(ColumnKind::Text.compare("9", "10", FMT), Ordering::Greater);
        assert_eq!(
            ColumnKind::Float.compare("2.50", "10.00", FMT),
            Ordering::Less
        );
        assert_eq!(
            ColumnKind::Date.compare("12-31-2023", "01-01-2024", FMT),
            Ordering::Less
        );
        assert_eq!(
            ColumnKind::Date.compare("", "01-01-2024", FMT),
            Ordering::Less
        );
    }

    #[test]
    fn test_display_groups_numbers_only() {
        assert_eq!(ColumnKind::Integer.display("1234567"), "1,234,567");
        assert_eq!(ColumnKind::Float.display("1234.50"), "1,234.50");
        assert_eq!(ColumnKind::Text.display("1234567"), "1234567");
    }

    #[test]
    fn test_summary_only_on_numeric() {
        let text = Column::new("Name", ColumnKind::Text, 100.0).with_summary(true);
        assert!(!text.summary);
        let age = Column::new("Age", ColumnKind::Integer, 60.0).with_summary(true);
        assert!(age.summary);
    }

    #[test]
    fn test_value_by_label() {
        let col = Column::new("Dept", depts(), 80.0);
        assert_eq!(col.value_by_label("Sales"), Some("2"));
        assert_eq!(col.value_by_label("HR"), None);
    }

    #[test]
    fn test_column_spec_from_json() {
        let json = r#"{"name":"Dept","kind":{"type":"choice","options":[{"label":"Eng","value":"e"}]},"filterable":true}"#;
        let spec: ColumnSpec = serde_json::from_str(json).unwrap();
        let col = Column::from(spec);
        assert_eq!(col.width, 100.0);
        assert!(col.filter.is_some());
        assert_eq!(col.value_by_label("Eng"), Some("e"));

        let json = r#"{"name":"Age","kind":{"type":"integer"},"summary":true}"#;
        let spec: ColumnSpec = serde_json::from_str(json).unwrap();
        assert!(Column::from(spec).summary);
    }
}
