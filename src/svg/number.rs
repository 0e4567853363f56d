//! Numeric helpers shared by the fitter and the optimizer.

use regex::Regex;
use std::sync::LazyLock;

/// One SVG number token: sign, digits, optional fraction and exponent.
pub static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?").expect("valid number regex")
});

/// Parse a length attribute (`"12"`, `"12px"`, `" 1e2 "`).
///
/// Percentages and other relative units have no absolute meaning without
/// a viewport, so they yield `None`.
pub fn parse_length(value: &str) -> Option<f64> {
    let value = value.trim();
    let value = value.strip_suffix("px").unwrap_or(value).trim_end();
    if value.ends_with('%') {
        return None;
    }
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a comma/whitespace separated number list (`points`, transform args).
pub fn parse_number_list(value: &str) -> Vec<f64> {
    NUMBER
        .find_iter(value)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .collect()
}

/// Format a number the way SVG attributes expect: no trailing `.0`, no `-0`.
pub fn format_number(value: f64) -> String {
    // Adding 0.0 turns -0.0 into 0.0
    format!("{}", value + 0.0)
}

/// Round to `precision` decimal places and format.
pub fn format_rounded(value: f64, precision: u8) -> String {
    let factor = 10f64.powi(i32::from(precision));
    format_number((value * factor).round() / factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_length() {
        assert_eq!(parse_length("12"), Some(12.0));
        assert_eq!(parse_length(" 12.5px "), Some(12.5));
        assert_eq!(parse_length("1e2"), Some(100.0));
        assert_eq!(parse_length("50%"), None);
        assert_eq!(parse_length("auto"), None);
        assert_eq!(parse_length("inf"), None);
    }

    #[test]
    fn test_parse_number_list() {
        assert_eq!(parse_number_list("10,20 30-40"), [10.0, 20.0, 30.0, -40.0]);
        assert_eq!(parse_number_list(".5.5"), [0.5, 0.5]);
        assert_eq!(parse_number_list("1e-1 2E+1"), [0.1, 20.0]);
        assert!(parse_number_list("").is_empty());
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(4000.0), "4000");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(-12.5), "-12.5");
    }

    #[test]
    fn test_format_rounded() {
        assert_eq!(format_rounded(1.23456, 2), "1.23");
        assert_eq!(format_rounded(1.005, 0), "1");
        assert_eq!(format_rounded(2.0, 3), "2");
        assert_eq!(format_rounded(-0.001, 2), "0");
    }
}
