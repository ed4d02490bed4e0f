use std::sync::OnceLock;

use chrono::{Datelike, Days, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Year assigned to `<Mon> <Day>` headers, which carry no year of their own.
pub const DEFAULT_FIXED_YEAR: i32 = 2025;

/// Years accepted when a numeric header cell is read as a serial date.
pub const HEADER_SERIAL_YEARS: std::ops::RangeInclusive<i32> = 1900..=2100;

/// Which half of an ambiguous `A/B/YYYY` date is tried as the month first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SlashOrder {
    #[default]
    MonthFirst,
    DayFirst,
}

/// Date interpretation knobs. Downstream ledgers rely on the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePolicy {
    pub fixed_year: i32,
    pub slash_order: SlashOrder,
}

impl Default for DatePolicy {
    fn default() -> Self {
        Self {
            fixed_year: DEFAULT_FIXED_YEAR,
            slash_order: SlashOrder::MonthFirst,
        }
    }
}

const MONTHS: &[(&str, u32)] = &[
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("may", 5),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("sep", 9),
    ("oct", 10),
    ("okt", 10),
    ("nov", 11),
    ("dec", 12),
];

fn iso_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"))
}

fn slash_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").expect("valid regex"))
}

fn serial_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+$").expect("valid regex"))
}

fn month_day_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Za-z]{3})\s+(\d{1,2})$").expect("valid regex"))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// 1-based month number for a three-letter abbreviation (English, plus `okt`).
pub fn month_number(abbrev: &str) -> Option<u32> {
    let lower = abbrev.to_ascii_lowercase();
    MONTHS.iter().find(|(name, _)| *name == lower).map(|(_, m)| *m)
}

pub fn month_day(month: &str, day: &str, year: i32) -> Option<NaiveDate> {
    let m = month_number(month)?;
    let d: u32 = day.parse().ok()?;
    NaiveDate::from_ymd_opt(year, m, d)
}

/// Spreadsheet serial day count; day zero is 1899-12-30.
pub fn serial_to_date(serial: u64) -> Option<NaiveDate> {
    if serial == 0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_days(Days::new(serial))
}

/// Serial conversion for numeric header cells, limited to `HEADER_SERIAL_YEARS`.
pub fn serial_to_header_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let date = serial_to_date(serial.floor() as u64)?;
    HEADER_SERIAL_YEARS.contains(&date.year()).then_some(date)
}

pub(crate) fn is_iso_shape(token: &str) -> bool {
    iso_re().is_match(token)
}

pub(crate) fn is_slash_shape(token: &str) -> bool {
    slash_re().is_match(token)
}

pub(crate) fn is_serial_shape(token: &str) -> bool {
    serial_re().is_match(token)
}

/// `<Mon> <Day>` with a known month abbreviation. The day is not range-checked.
pub(crate) fn is_month_day_shape(token: &str) -> bool {
    month_day_re()
        .captures(token)
        .is_some_and(|caps| month_number(&caps[1]).is_some())
}

fn resolve_slash(a: u32, b: u32, year: i32, order: SlashOrder) -> Option<NaiveDate> {
    let attempts = match order {
        SlashOrder::MonthFirst => [(a, b), (b, a)],
        SlashOrder::DayFirst => [(b, a), (a, b)],
    };
    attempts
        .into_iter()
        .find_map(|(month, day)| NaiveDate::from_ymd_opt(year, month, day))
        .filter(|date| date.year() == year)
}

/// Canonical `YYYY-MM-DD` for a date-like token, or `None`.
pub fn resolve_date(token: &str, policy: &DatePolicy) -> Option<String> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    if is_iso_shape(token) {
        return Some(token.to_string());
    }
    if let Some(caps) = slash_re().captures(token) {
        let a: u32 = caps[1].parse().ok()?;
        let b: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        return resolve_slash(a, b, year, policy.slash_order).map(format_date);
    }
    if let Some(caps) = month_day_re().captures(token) {
        return month_day(&caps[1], &caps[2], policy.fixed_year).map(format_date);
    }
    if is_serial_shape(token) {
        let serial: u64 = token.parse().ok()?;
        return serial_to_date(serial).map(format_date);
    }
    None
}
