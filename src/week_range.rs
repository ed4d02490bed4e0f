use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::dates::month_day;

fn cross_month_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([A-Za-z]{3})\s+(\d{1,2})\s*-\s*([A-Za-z]{3})\s+(\d{1,2})$")
            .expect("valid regex")
    })
}

fn same_month_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([A-Za-z]{3})\s+(\d{1,2})\s*-\s*(\d{1,2})$").expect("valid regex")
    })
}

/// Start and end of a week-range header such as `Oct 27 - Nov 2` or `Nov 3-9`.
pub fn range_bounds(header: &str, year: i32) -> Option<(NaiveDate, NaiveDate)> {
    if let Some(caps) = cross_month_re().captures(header) {
        let start = month_day(&caps[1], &caps[2], year)?;
        let end = month_day(&caps[3], &caps[4], year)?;
        return Some((start, end));
    }
    if let Some(caps) = same_month_re().captures(header) {
        let start = month_day(&caps[1], &caps[2], year)?;
        let end = month_day(&caps[1], &caps[3], year)?;
        return Some((start, end));
    }
    None
}

/// Every date from `start` to `end` inclusive. Empty when `end < start`.
pub fn expand(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// Expanded dates for a week-range header; `None` unless at least one date results.
pub fn expand_week_range(header: &str, year: i32) -> Option<Vec<NaiveDate>> {
    let (start, end) = range_bounds(header, year)?;
    let dates = expand(start, end);
    (!dates.is_empty()).then_some(dates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::format_date;

    fn expanded(header: &str) -> Option<Vec<String>> {
        expand_week_range(header, 2025).map(|dates| dates.into_iter().map(format_date).collect())
    }

    #[test]
    fn test_cross_month_range() {
        let dates = expanded("Oct 27 - Nov 2").unwrap();
        assert_eq!(dates.len(), 7);
        assert_eq!(dates.first().unwrap(), "2025-10-27");
        assert_eq!(dates[4], "2025-10-31");
        assert_eq!(dates[5], "2025-11-01");
        assert_eq!(dates.last().unwrap(), "2025-11-02");
    }

    #[test]
    fn test_same_month_range() {
        let dates = expanded("Nov 3-9").unwrap();
        assert_eq!(
            dates,
            vec![
                "2025-11-03",
                "2025-11-04",
                "2025-11-05",
                "2025-11-06",
                "2025-11-07",
                "2025-11-08",
                "2025-11-09",
            ]
        );
    }

    #[test]
    fn test_localized_month_alias() {
        let dates = expanded("okt 30 - nov 1").unwrap();
        assert_eq!(dates, vec!["2025-10-30", "2025-10-31", "2025-11-01"]);
    }

    #[test]
    fn test_single_day_range() {
        assert_eq!(expanded("Jan 5-5").unwrap(), vec!["2025-01-05"]);
    }

    #[test]
    fn test_reversed_range_is_no_match() {
        assert_eq!(expanded("Nov 9-3"), None);
        assert_eq!(expanded("Dec 2 - Nov 30"), None);
    }

    #[test]
    fn test_invalid_endpoints_are_no_match() {
        assert_eq!(expanded("Feb 27 - Feb 30"), None);
        assert_eq!(expanded("Foo 1-7"), None);
        assert_eq!(expanded("Jan 5"), None);
    }

    #[test]
    fn test_year_boundary_stays_in_fixed_year() {
        // Both ends share the fixed year, so a span crossing New Year reads backwards.
        assert_eq!(expanded("Dec 29 - Jan 4"), None);
    }
}
