use comfy_table::{presets::UTF8_FULL_CONDENSED, CellAlignment, Table};

use crate::models::{OutputRecord, OUTPUT_COLUMNS};

/// Ledger amount string: plain decimal, exactly two places, no grouping.
/// Halves round away from zero and a rounded zero is never negative.
pub fn amount_string(val: f64) -> String {
    let cents = (val * 100.0).round();
    let rounded = if cents.is_finite() { cents / 100.0 } else { val };
    format!("{:.2}", rounded + 0.0)
}

/// Terminal table of records, at most `limit` rows.
pub fn records_table(records: &[OutputRecord], limit: usize) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(OUTPUT_COLUMNS.to_vec());
    for record in records.iter().take(limit) {
        table.add_row(record.fields().to_vec());
    }
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PARENT_TYPE;

    fn record(amount: &str) -> OutputRecord {
        OutputRecord {
            currency: "SEK".into(),
            amount: amount.into(),
            date: "2025-01-01".into(),
            parent_id: "E1".into(),
            parent_type: PARENT_TYPE.into(),
            description: "Ads".into(),
            category: "Ads".into(),
        }
    }

    #[test]
    fn test_amount_string() {
        assert_eq!(amount_string(1200.0), "1200.00");
        assert_eq!(amount_string(100.5), "100.50");
        assert_eq!(amount_string(-42.5), "-42.50");
        assert_eq!(amount_string(0.0), "0.00");
        assert_eq!(amount_string(1234567.891), "1234567.89");
    }

    #[test]
    fn test_amount_string_rounds_half_away_from_zero() {
        assert_eq!(amount_string(1.125), "1.13");
        assert_eq!(amount_string(0.125), "0.13");
        assert_eq!(amount_string(-1.125), "-1.13");
        assert_eq!(amount_string(2.375), "2.38");
    }

    #[test]
    fn test_amount_string_no_negative_zero() {
        assert_eq!(amount_string(-0.001), "0.00");
        assert_eq!(amount_string(-0.0), "0.00");
    }

    #[test]
    fn test_records_table_respects_limit() {
        let records = vec![record("1.00"), record("2.00"), record("3.00")];
        let rendered = records_table(&records, 2).to_string();
        assert!(rendered.contains("amount.stringValue"));
        assert!(rendered.contains("2.00"));
        assert!(!rendered.contains("3.00"));
    }
}
