use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("The file contains no rows")]
    EmptyFile,

    #[error("No \"Category\" column found in the header row")]
    MissingCategoryColumn,

    #[error("No date columns found after the \"Category\" column")]
    NoDateColumns,

    #[error("Every row below the header is blank")]
    EmptyDataset,

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Missing required column: {0}")]
    MissingRequiredColumn(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("XLSX write error: {0}")]
    Xlsx(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, ForecastError>;
