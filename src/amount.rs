use std::sync::OnceLock;

use regex::Regex;

fn number_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?").expect("valid regex")
    })
}

/// Parse a cell amount. The first comma is read as the decimal point; there is no
/// thousands-separator handling. Trailing text after the number is ignored.
pub fn resolve_amount(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    let s = s.replacen(',', ".", 1);
    let number = number_prefix_re().find(&s)?;
    number.as_str().parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_amounts() {
        assert_eq!(resolve_amount("1200"), Some(1200.0));
        assert_eq!(resolve_amount("  -42.50 "), Some(-42.5));
        assert_eq!(resolve_amount("+7"), Some(7.0));
        assert_eq!(resolve_amount(".5"), Some(0.5));
        assert_eq!(resolve_amount("1e3"), Some(1000.0));
    }

    #[test]
    fn test_comma_decimal() {
        assert_eq!(resolve_amount("100,50"), Some(100.5));
        assert_eq!(resolve_amount("-0,75"), Some(-0.75));
    }

    #[test]
    fn test_only_first_comma_is_replaced() {
        // Only one comma becomes a dot; parsing stops at the next separator.
        assert_eq!(resolve_amount("1,234,5"), Some(1.234));
        assert_eq!(resolve_amount("1.234,5"), Some(1.234));
    }

    #[test]
    fn test_blank_and_garbage() {
        assert_eq!(resolve_amount(""), None);
        assert_eq!(resolve_amount("   "), None);
        assert_eq!(resolve_amount("abc"), None);
        assert_eq!(resolve_amount("NaN"), None);
        assert_eq!(resolve_amount("inf"), None);
        assert_eq!(resolve_amount("-"), None);
    }

    #[test]
    fn test_trailing_text_ignored() {
        assert_eq!(resolve_amount("1200 kr"), Some(1200.0));
        assert_eq!(resolve_amount("12abc"), Some(12.0));
    }
}
