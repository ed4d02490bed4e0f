use crate::dates::{format_date, serial_to_header_date, DatePolicy};
use crate::error::{ForecastError, Result};
use crate::headers::scan_date_columns;
use crate::models::{Cell, DataRow, EntityColumns, HeaderSchema, ParsedTable, RawGrid};

const CATEGORY_LABEL: &str = "category";
const ENTITY_LABELS: &[&str] = &["entityid", "parent.id"];
const CURRENCY_LABELS: &[&str] = &["currency", "amount.currency"];

/// Header cell as text. Numeric cells in the serial-date year range become ISO dates.
pub fn header_text(cell: &Cell) -> String {
    match cell {
        Cell::Number(n) => match serial_to_header_date(*n) {
            Some(date) => format_date(date),
            None => cell.to_text(),
        },
        _ => cell.to_text(),
    }
}

pub fn find_category_column(headers: &[String]) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(CATEGORY_LABEL))
}

fn compact_label(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .collect()
}

fn find_labeled_column(headers: &[String], labels: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| labels.contains(&compact_label(h).as_str()))
}

fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

/// Parse a grid for single-entity conversion.
pub fn parse_grid(grid: &RawGrid, policy: &DatePolicy) -> Result<ParsedTable> {
    let Some((header_row, data)) = grid.split_first() else {
        return Err(ForecastError::EmptyFile);
    };

    let headers: Vec<String> = header_row.iter().map(header_text).collect();
    let category_column =
        find_category_column(&headers).ok_or(ForecastError::MissingCategoryColumn)?;

    let scan = scan_date_columns(&headers, category_column, policy);
    if scan.date_columns.is_empty() {
        return Err(ForecastError::NoDateColumns);
    }

    let width = headers.len();
    let total = data.len();
    let rows: Vec<DataRow> = data
        .iter()
        .map(|row| {
            let mut cells: DataRow = row.iter().take(width).map(Cell::to_text).collect();
            cells.resize(width, String::new());
            cells
        })
        .filter(|row| !is_blank_row(row))
        .collect();
    if rows.is_empty() {
        return Err(ForecastError::EmptyDataset);
    }
    tracing::debug!(
        category_column,
        date_columns = scan.date_columns.len(),
        rows = rows.len(),
        blank_rows = total - rows.len(),
        "parsed header schema"
    );

    Ok(ParsedTable {
        schema: HeaderSchema {
            headers,
            category_column,
            date_columns: scan.date_columns,
            expansions: scan.expansions,
        },
        rows,
    })
}

/// Parse a grid whose rows carry their own entity id and currency.
pub fn parse_multi_entity_grid(
    grid: &RawGrid,
    policy: &DatePolicy,
) -> Result<(ParsedTable, EntityColumns)> {
    let table = parse_grid(grid, policy)?;
    let headers = &table.schema.headers;
    let entity_column = find_labeled_column(headers, ENTITY_LABELS)
        .ok_or_else(|| ForecastError::MissingRequiredColumn("entity id".to_string()))?;
    let currency_column = find_labeled_column(headers, CURRENCY_LABELS)
        .ok_or_else(|| ForecastError::MissingRequiredColumn("currency".to_string()))?;
    let columns = EntityColumns {
        entity_column,
        currency_column,
    };
    Ok((table, columns))
}
