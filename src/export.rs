use std::path::Path;

use crate::dates::{resolve_date, DatePolicy};
use crate::error::{ForecastError, Result};
use crate::models::{OutputRecord, OUTPUT_COLUMNS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Csv,
    Xlsx,
}

impl OutputFormat {
    /// Format implied by an output path's extension, if any.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" => Some(Self::Xlsx),
            _ => None,
        }
    }
}

/// Output rows (header first) with each date re-normalized.
pub fn output_rows(records: &[OutputRecord], policy: &DatePolicy) -> Vec<Vec<String>> {
    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(OUTPUT_COLUMNS.iter().map(|c| c.to_string()).collect());
    for record in records {
        let mut row: Vec<String> = record.fields().iter().map(|f| f.to_string()).collect();
        if let Some(date) = resolve_date(&record.date, policy) {
            row[2] = date;
        }
        rows.push(row);
    }
    rows
}

/// Comma-separated text: rows joined by `\n`, no BOM and no trailing newline.
pub fn to_csv_string(records: &[OutputRecord], policy: &DatePolicy) -> Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for row in output_rows(records, policy) {
        wtr.write_record(&row)?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| ForecastError::Io(e.into_error()))?;
    let mut text = String::from_utf8_lossy(&bytes).into_owned();
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

pub fn write_csv(records: &[OutputRecord], policy: &DatePolicy, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, to_csv_string(records, policy)?)?;
    Ok(())
}

#[cfg(feature = "xlsx")]
fn build_workbook(records: &[OutputRecord], policy: &DatePolicy) -> Result<rust_xlsxwriter::Workbook> {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("Forecast")
        .map_err(|e| ForecastError::Xlsx(e.to_string()))?;
    for (row_idx, row) in output_rows(records, policy).iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .map_err(|e| {
                    ForecastError::Xlsx(format!("row {}, column {}: {e}", row_idx + 1, col_idx + 1))
                })?;
        }
    }
    Ok(workbook)
}

/// Single-sheet workbook with the same rows as the CSV rendering.
#[cfg(feature = "xlsx")]
pub fn write_xlsx(records: &[OutputRecord], policy: &DatePolicy, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut workbook = build_workbook(records, policy)?;
    workbook
        .save(path)
        .map_err(|e| ForecastError::Xlsx(format!("failed writing {}: {e}", path.display())))
}

#[cfg(not(feature = "xlsx"))]
pub fn write_xlsx(_records: &[OutputRecord], _policy: &DatePolicy, path: &Path) -> Result<()> {
    Err(ForecastError::UnsupportedFormat(format!(
        "{} (built without workbook support)",
        path.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PARENT_TYPE;

    fn record(description: &str, amount: &str, date: &str) -> OutputRecord {
        OutputRecord {
            currency: "SEK".into(),
            amount: amount.into(),
            date: date.into(),
            parent_id: "ENTITY_ID".into(),
            parent_type: PARENT_TYPE.into(),
            description: description.into(),
            category: description.into(),
        }
    }

    #[test]
    fn test_csv_layout() {
        let records = vec![
            record("Ads", "1200.00", "2025-01-01"),
            record("Hosting", "100.50", "2025-01-02"),
        ];
        let text = to_csv_string(&records, &DatePolicy::default()).unwrap();
        assert_eq!(
            text,
            "amount.currency,amount.stringValue,date,parent.id,parent.type,description,metadata.atlar.category\n\
             SEK,1200.00,2025-01-01,ENTITY_ID,ENTITY,Ads,Ads\n\
             SEK,100.50,2025-01-02,ENTITY_ID,ENTITY,Hosting,Hosting"
        );
        assert!(!text.starts_with('\u{feff}'));
    }

    #[test]
    fn test_csv_quotes_when_needed() {
        let records = vec![record("Rent, HQ", "1.00", "2025-01-01")];
        let text = to_csv_string(&records, &DatePolicy::default()).unwrap();
        assert!(text.ends_with("ENTITY,\"Rent, HQ\",\"Rent, HQ\""));
    }

    #[test]
    fn test_dates_renormalized_on_output() {
        let records = vec![
            record("Ads", "1.00", "Jan 3"),
            record("Ads", "1.00", "not a date"),
        ];
        let rows = output_rows(&records, &DatePolicy::default());
        assert_eq!(rows[1][2], "2025-01-03");
        assert_eq!(rows[2][2], "not a date");
    }

    #[test]
    fn test_empty_records_still_have_header() {
        let text = to_csv_string(&[], &DatePolicy::default()).unwrap();
        assert_eq!(text, OUTPUT_COLUMNS.join(","));
    }

    #[test]
    fn test_output_format_from_path() {
        assert_eq!(OutputFormat::from_path(Path::new("out.CSV")), Some(OutputFormat::Csv));
        assert_eq!(OutputFormat::from_path(Path::new("out.xlsx")), Some(OutputFormat::Xlsx));
        assert_eq!(OutputFormat::from_path(Path::new("out.json")), None);
        assert_eq!(OutputFormat::from_path(Path::new("out")), None);
    }

    #[test]
    fn test_write_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.csv");
        write_csv(&[record("Ads", "1.00", "2025-01-01")], &DatePolicy::default(), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[cfg(feature = "xlsx")]
    #[test]
    fn test_xlsx_matches_csv_rows() {
        use calamine::Reader;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        let records = vec![
            record("Ads", "1200.00", "2025-01-01"),
            record("Hosting", "100.50", "2025-01-02"),
        ];
        let policy = DatePolicy::default();
        write_xlsx(&records, &policy, &path).unwrap();

        let mut workbook = calamine::open_workbook_auto(&path).unwrap();
        let range = workbook.worksheet_range_at(0).unwrap().unwrap();
        let from_xlsx: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect();
        assert_eq!(from_xlsx, output_rows(&records, &policy));
    }
}
