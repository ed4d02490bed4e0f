use crate::cli::{convert_file, ModeArgs};
use crate::error::Result;
use crate::fmt::records_table;
use crate::settings::load_settings;

pub fn run(file: &str, mode: &ModeArgs, limit: usize) -> Result<()> {
    let settings = load_settings();
    let (records, _) = convert_file(file, mode, &settings)?;

    if records.is_empty() {
        println!("No records: every cell was blank or had no usable date.");
        return Ok(());
    }

    println!("{}", records_table(&records, limit));
    if records.len() > limit {
        println!("... {} more not shown", records.len() - limit);
    }
    println!("{} records", records.len());
    Ok(())
}
