use std::io::Write;
use std::path::PathBuf;

use crate::cli::{convert_file, ModeArgs};
use crate::error::{ForecastError, Result};
use crate::export::{to_csv_string, write_csv, write_xlsx, OutputFormat};
use crate::settings::load_settings;

pub fn run(file: &str, mode: &ModeArgs, output: Option<&str>, format: Option<OutputFormat>) -> Result<()> {
    let settings = load_settings();
    let (records, policy) = convert_file(file, mode, &settings)?;

    let output = output.map(PathBuf::from);
    let format = format
        .or_else(|| output.as_deref().and_then(OutputFormat::from_path))
        .unwrap_or(OutputFormat::Csv);

    match (format, output) {
        (OutputFormat::Csv, None) => {
            let text = to_csv_string(&records, &policy)?;
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{text}")?;
        }
        (OutputFormat::Csv, Some(path)) => {
            write_csv(&records, &policy, &path)?;
            eprintln!("{} records written to {}", records.len(), path.display());
        }
        (OutputFormat::Xlsx, Some(path)) => {
            write_xlsx(&records, &policy, &path)?;
            eprintln!("{} records written to {}", records.len(), path.display());
        }
        (OutputFormat::Xlsx, None) => {
            return Err(ForecastError::Settings(
                "XLSX output needs --output <path>".to_string(),
            ));
        }
    }
    Ok(())
}
