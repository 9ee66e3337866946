//! Tab/newline text serialization of a selection.
//!
//! Copy writes one line per row, cells joined by tabs, every line ending in
//! `\r\n`. Paste accepts `\r\n` or bare `\n` line endings.

use crate::dataset::{Dataset, Scope};
use crate::types::CellRange;

/// Serialize the normalized range from the rendered rows' string encoding.
pub fn copy_text(dataset: &Dataset, range: CellRange) -> String {
    let (r0, c0, r1, c1) = range.bounds();
    let mut out = String::new();
    for row in r0..=r1 {
        let Some(row) = dataset.row(Scope::Rendered, row) else {
            break;
        };
        let line: Vec<&str> = (c0..=c1).map(|c| row.text(c)).collect();
        out.push_str(&line.join("\t"));
        out.push_str("\r\n");
    }
    out
}

/// Split pasted text into rows of cell values.
///
/// A trailing line terminator does not produce an extra empty row.
pub fn parse_paste(text: &str) -> Vec<Vec<String>> {
    let separator = if text.contains("\r\n") { "\r\n" } else { "\n" };
    let mut lines: Vec<&str> = text.split(separator).collect();
    if lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
        .into_iter()
        .map(|line| line.split('\t').map(str::to_string).collect())
        .collect()
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
    use crate::types::{ColumnKind, Row};

    fn dataset(rows: &[[&str; 2]]) -> Dataset {
        let mut ds = Dataset::new();
        for r in rows {
            let cells = r
                .iter()
                .map(|t| ColumnKind::Text.coerce(0, t, "%m-%d-%Y").unwrap())
                .collect();
            ds.push(Row::new(cells), true);
        }
        ds
    }

    #[test]
    fn test_copy_block() {
        let ds = dataset(&[["a", "1"], ["b", "2"]]);
        assert_eq!(copy_text(&ds, CellRange::new(1, 1, 0, 0)), "a\t1\r\nb\t2\r\n");
        assert_eq!(copy_text(&ds, CellRange::new(0, 1, 1, 1)), "1\r\n2\r\n");
    }

    #[test]
    fn test_copy_keeps_empty_last_cell() {
        let ds = dataset(&[["a", ""]]);
        assert_eq!(copy_text(&ds, CellRange::new(0, 0, 0, 1)), "a\t\r\n");
    }

    #[test]
    fn test_parse_crlf_and_lf() {
        assert_eq!(
            parse_paste("1\t2\r\n3\t4\r\n"),
            vec![vec!["1", "2"], vec!["3", "4"]]
        );
        assert_eq!(parse_paste("x\ny\n"), vec![vec!["x"], vec!["y"]]);
        assert_eq!(parse_paste("solo"), vec![vec!["solo"]]);
        assert!(parse_paste("").is_empty());
    }
}
