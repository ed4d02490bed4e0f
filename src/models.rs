use std::collections::BTreeMap;

use chrono::NaiveDate;

/// A raw spreadsheet cell as decoded from the input file.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    pub fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => number_text(*n),
            Cell::Bool(true) => "TRUE".to_string(),
            Cell::Bool(false) => "FALSE".to_string(),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }
}

fn number_text(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Rows of raw cells; the first row is the header row.
pub type RawGrid = Vec<Vec<Cell>>;

/// Data row with cells aligned to the header row.
pub type DataRow = Vec<String>;

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderSchema {
    pub headers: Vec<String>,
    pub category_column: usize,
    /// Strictly increasing, all to the right of `category_column`.
    pub date_columns: Vec<usize>,
    /// Week-range columns only, never empty.
    pub expansions: BTreeMap<usize, Vec<NaiveDate>>,
}

/// Column positions required in multi-entity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityColumns {
    pub entity_column: usize,
    pub currency_column: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTable {
    pub schema: HeaderSchema,
    pub rows: Vec<DataRow>,
}

pub const PARENT_TYPE: &str = "ENTITY";

pub const OUTPUT_COLUMNS: [&str; 7] = [
    "amount.currency",
    "amount.stringValue",
    "date",
    "parent.id",
    "parent.type",
    "description",
    "metadata.atlar.category",
];

/// One ledger import line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    pub currency: String,
    pub amount: String,
    pub date: String,
    pub parent_id: String,
    pub parent_type: String,
    pub description: String,
    pub category: String,
}

impl OutputRecord {
    /// Field values in `OUTPUT_COLUMNS` order.
    pub fn fields(&self) -> [&str; 7] {
        [
            self.currency.as_str(),
            self.amount.as_str(),
            self.date.as_str(),
            self.parent_id.as_str(),
            self.parent_type.as_str(),
            self.description.as_str(),
            self.category.as_str(),
        ]
    }
}
