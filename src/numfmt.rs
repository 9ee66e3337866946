//! Number display formatting.
//!
//! Numeric cells and summaries are shown with `,` thousands separators.
//! Grouping works on the already-stringified value so the display never
//! disagrees with the string encoding it was derived from.

/// Insert thousands separators into the integer part of a numeric string.
///
/// The sign and anything after the first `.` are kept as-is. Strings that do
/// not start with digits (after an optional sign) come back unchanged.
pub fn group_thousands(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };
    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + int_part.len() / 3);
    out.push_str(sign);
    out.push_str(&group_digits(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Format an integer with thousands separators.
pub fn format_integer(value: i64) -> String {
    group_thousands(&value.to_string())
}

/// Format a float with two decimals and thousands separators.
pub fn format_float(value: f64) -> String {
    group_thousands(&format!("{value:.2}"))
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    if len <= 3 {
        return digits.to_string();
    }

    let mut out = String::with_capacity(len + (len - 1) / 3);
    let mut first = len % 3;
    if first == 0 {
        first = 3;
    }
    let (head, mut rest) = digits.split_at(first);
    out.push_str(head);
    while !rest.is_empty() {
        let (group, tail) = rest.split_at(3.min(rest.len()));
        out.push(',');
        out.push_str(group);
        rest = tail;
    }
    out
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

    #[test_case("0", "0")]
    #[test_case("999", "999")]
    #[test_case("1000", "1,000")]
    #[test_case("1234567", "1,234,567")]
    #[test_case("-1234567", "-1,234,567")]
    #[test_case("1234567.89", "1,234,567.89")]
    #[test_case("100000.00", "100,000.00")]
    #[test_case("abc", "abc")]
    #[test_case("", "")]
    fn test_group_thousands(input: &str, expected: &str) {
        assert_eq!(group_thousands(input), expected);
    }

    #[test]
    fn test_format_float_two_decimals() {
        assert_eq!(format_float(1234.5), "1,234.50");
        assert_eq!(format_float(0.004), "0.00");
        assert_eq!(format_float(-2500.0), "-2,500.00");
    }

    #[test]
    fn test_format_integer() {
        assert_eq!(format_integer(-12_345), "-12,345");
    }
}
