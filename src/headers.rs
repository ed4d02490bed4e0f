use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::dates::{
    is_iso_shape, is_month_day_shape, is_serial_shape, is_slash_shape, serial_to_header_date,
    DatePolicy,
};
use crate::week_range::expand_week_range;

/// How one header cell to the right of the category column is treated.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderClass {
    /// A date column; week ranges carry their expansion.
    DateLike(Option<Vec<NaiveDate>>),
    /// Empty header, skipped without ending the scan.
    Blank,
    /// Ends the date-column run.
    Terminator,
}

/// Trim, collapse whitespace runs and turn en/em dashes into `-`.
pub fn normalize_header(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace(['\u{2013}', '\u{2014}'], "-")
}

fn is_single_date(header: &str) -> bool {
    if is_serial_shape(header) {
        return header
            .parse::<f64>()
            .ok()
            .and_then(serial_to_header_date)
            .is_some();
    }
    is_iso_shape(header) || is_slash_shape(header) || is_month_day_shape(header)
}

pub fn classify_header(raw: &str, policy: &DatePolicy) -> HeaderClass {
    let header = normalize_header(raw);
    if header.is_empty() {
        return HeaderClass::Blank;
    }
    if let Some(dates) = expand_week_range(&header, policy.fixed_year) {
        return HeaderClass::DateLike(Some(dates));
    }
    if is_single_date(&header) {
        HeaderClass::DateLike(None)
    } else {
        HeaderClass::Terminator
    }
}

/// Result of scanning the headers after the category column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateScan {
    pub date_columns: Vec<usize>,
    pub expansions: BTreeMap<usize, Vec<NaiveDate>>,
}

pub fn scan_date_columns(headers: &[String], category_column: usize, policy: &DatePolicy) -> DateScan {
    let mut scan = DateScan::default();
    for (idx, header) in headers.iter().enumerate().skip(category_column + 1) {
        match classify_header(header, policy) {
            HeaderClass::DateLike(expansion) => {
                scan.date_columns.push(idx);
                if let Some(dates) = expansion {
                    scan.expansions.insert(idx, dates);
                }
            }
            HeaderClass::Blank => continue,
            HeaderClass::Terminator => {
                tracing::debug!(column = idx, header = %header, "date column scan stopped");
                break;
            }
        }
    }
    scan
}
