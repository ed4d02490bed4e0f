use std::path::Path;

use crate::error::{ForecastError, Result};
use crate::models::{Cell, RawGrid};

const DELIMITED_EXTENSIONS: &[&str] = &["csv", "tsv", "txt"];
const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Delimited,
    Workbook,
}

impl InputFormat {
    pub fn from_path(file_path: &Path) -> Result<Self> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        if DELIMITED_EXTENSIONS.contains(&ext.as_str()) {
            Ok(Self::Delimited)
        } else if WORKBOOK_EXTENSIONS.contains(&ext.as_str()) {
            Ok(Self::Workbook)
        } else if ext.is_empty() {
            Err(ForecastError::UnsupportedFormat(file_path.display().to_string()))
        } else {
            Err(ForecastError::UnsupportedFormat(format!(".{ext}")))
        }
    }
}

/// Tab when the text has tabs and no commas, comma otherwise.
pub fn detect_delimiter(text: &str) -> u8 {
    if text.contains('\t') && !text.contains(',') {
        b'\t'
    } else {
        b','
    }
}

pub fn read_delimited(text: &str) -> Result<RawGrid> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(detect_delimiter(text))
        .from_reader(text.as_bytes());
    let mut grid = Vec::new();
    for result in rdr.records() {
        let record = result?;
        grid.push(record.iter().map(Cell::from).collect());
    }
    Ok(grid)
}

#[cfg(feature = "xlsx")]
fn cell_from_data(data: &calamine::Data) -> Cell {
    use calamine::Data;
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::from(s.as_str()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
    }
}

/// First sheet of a workbook, gaps filled with `Cell::Empty`.
#[cfg(feature = "xlsx")]
pub fn read_workbook(file_path: &Path) -> Result<RawGrid> {
    use calamine::Reader;

    let mut workbook = calamine::open_workbook_auto(file_path)
        .map_err(|e| ForecastError::Workbook(format!("Failed to open workbook: {e}")))?;
    let Some(range) = workbook.worksheet_range_at(0) else {
        return Ok(Vec::new());
    };
    let range = range.map_err(|e| ForecastError::Workbook(e.to_string()))?;
    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect())
}

#[cfg(not(feature = "xlsx"))]
pub fn read_workbook(file_path: &Path) -> Result<RawGrid> {
    Err(ForecastError::UnsupportedFormat(format!(
        "{} (built without workbook support)",
        file_path.display()
    )))
}

/// Decode a forecast file into raw rows of cells.
pub fn read_grid(file_path: &Path) -> Result<RawGrid> {
    let grid = match InputFormat::from_path(file_path)? {
        InputFormat::Delimited => {
            let bytes = std::fs::read(file_path)?;
            read_delimited(&String::from_utf8_lossy(&bytes))?
        }
        InputFormat::Workbook => read_workbook(file_path)?,
    };
    tracing::debug!(path = %file_path.display(), rows = grid.len(), "read input grid");
    Ok(grid)
}
