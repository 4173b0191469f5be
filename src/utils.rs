//! Cell-level helpers shared by the loaders.

/// Returns `None` for empty or whitespace-only cells.
pub fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(value) }
}

/// Parses a whole number, accepting a zero fractional part such as `2020.0`.
///
/// Spreadsheet exports write integer columns with missing cells as floats, so
/// `"12.0"` is accepted while `"12.5"` and `"n/a"` are not.
pub fn parse_whole_number(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Ok(number) = value.parse::<i64>() {
        return Some(number);
    }
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() && number.fract() == 0.0 => Some(number as i64),
        _ => None,
    }
}

/// Parses a publication year cell.
pub fn parse_year(value: &str) -> Option<i32> {
    parse_whole_number(value).and_then(|year| i32::try_from(year).ok())
}

/// Parses a citation count cell. Negative counts are rejected.
pub fn parse_count(value: &str) -> Option<u64> {
    parse_whole_number(value).and_then(|count| u64::try_from(count).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("2020", Some(2020))]
    #[case(" 2021 ", Some(2021))]
    #[case("2020.0", Some(2020))]
    #[case("2020.5", None)]
    #[case("", None)]
    #[case("Early Access", None)]
    #[case("99999999999", None)]
    fn test_parse_year(#[case] input: &str, #[case] expected: Option<i32>) {
        assert_eq!(parse_year(input), expected);
    }

    #[rstest]
    #[case("0", Some(0))]
    #[case("15", Some(15))]
    #[case("3.0", Some(3))]
    #[case("-1", None)]
    #[case("NaN", None)]
    #[case("inf", None)]
    fn test_parse_count(#[case] input: &str, #[case] expected: Option<u64>) {
        assert_eq!(parse_count(input), expected);
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(""), None);
        assert_eq!(non_empty("   "), None);
        assert_eq!(non_empty("a;b"), Some("a;b"));
    }
}
