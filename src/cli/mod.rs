pub mod config;
pub mod convert;
pub mod preview;

use std::path::Path;

use clap::{Args, Parser, Subcommand};

use crate::dates::{DatePolicy, SlashOrder};
use crate::error::{ForecastError, Result};
use crate::export::OutputFormat;
use crate::importer::read_grid;
use crate::models::OutputRecord;
use crate::parser::{parse_grid, parse_multi_entity_grid};
use crate::settings::Settings;
use crate::transformer::{transform, EntityContext};

#[derive(Parser)]
#[command(
    name = "forecast-import",
    about = "Turn category-by-date forecast spreadsheets into ledger import records."
)]
pub struct Cli {
    /// Log skipped rows and columns.
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a forecast file to ledger records.
    Convert {
        /// Path to a CSV/TSV or workbook file
        file: String,
        #[command(flatten)]
        mode: ModeArgs,
        /// Output path (CSV goes to stdout when omitted)
        #[arg(long, short)]
        output: Option<String>,
        /// Output format (default: from the output extension, else csv)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Show the records a forecast file would produce.
    Preview {
        /// Path to a CSV/TSV or workbook file
        file: String,
        #[command(flatten)]
        mode: ModeArgs,
        /// Maximum rows to display
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Show or change saved defaults.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Args, Clone, Default)]
pub struct ModeArgs {
    /// Currency for every record (single-entity mode)
    #[arg(long)]
    pub currency: Option<String>,
    /// Parent entity id for every record (single-entity mode)
    #[arg(long = "parent-id")]
    pub parent_id: Option<String>,
    /// Read entity id and currency from columns in each row
    #[arg(long = "multi-entity", conflicts_with_all = ["currency", "parent_id"])]
    pub multi_entity: bool,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the current settings.
    Show,
    /// Update saved settings.
    Set {
        /// Default currency
        #[arg(long)]
        currency: Option<String>,
        /// Default parent entity id
        #[arg(long = "parent-id")]
        parent_id: Option<String>,
        /// Year used for `<Mon> <Day>` headers
        #[arg(long)]
        year: Option<i32>,
        /// How ambiguous A/B/YYYY headers are read first
        #[arg(long = "slash-order", value_enum)]
        slash_order: Option<SlashOrder>,
    },
}

fn required(flag: Option<&str>, saved: Option<&str>, name: &str) -> Result<String> {
    flag.or(saved)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            ForecastError::Settings(format!(
                "No {name} given. Pass --{name} or run `forecast-import config set --{name} ...`."
            ))
        })
}

/// Read, parse and transform one input file according to the mode flags.
pub(crate) fn convert_file(file: &str, mode: &ModeArgs, settings: &Settings) -> Result<(Vec<OutputRecord>, DatePolicy)> {
    let policy = settings.date_policy();
    let grid = read_grid(Path::new(file))?;
    let records = if mode.multi_entity {
        let (table, columns) = parse_multi_entity_grid(&grid, &policy)?;
        transform(&table, &EntityContext::Multi(columns), &policy)
    } else {
        let currency = required(mode.currency.as_deref(), settings.currency.as_deref(), "currency")?;
        let parent_id = required(mode.parent_id.as_deref(), settings.parent_id.as_deref(), "parent-id")?;
        let table = parse_grid(&grid, &policy)?;
        let context = EntityContext::Single {
            currency: currency.to_uppercase(),
            parent_id,
        };
        transform(&table, &context, &policy)
    };
    Ok((records, policy))
}
