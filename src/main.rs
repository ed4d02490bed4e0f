mod amount;
mod cli;
mod dates;
mod error;
mod export;
mod fmt;
mod headers;
mod importer;
mod models;
mod parser;
mod settings;
mod transformer;
mod week_range;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ConfigCommands};

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "forecast_import=debug"
    } else {
        "forecast_import=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Convert {
            file,
            mode,
            output,
            format,
        } => cli::convert::run(&file, &mode, output.as_deref(), format),
        Commands::Preview { file, mode, limit } => cli::preview::run(&file, &mode, limit),
        Commands::Config { command } => match command {
            ConfigCommands::Show => cli::config::show(),
            ConfigCommands::Set {
                currency,
                parent_id,
                year,
                slash_order,
            } => cli::config::set(currency, parent_id, year, slash_order),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
