//! CLI entry point for the csvsight analysis service.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Exploratory data analysis for CSV files",
    long_about = "Profiles a CSV dataset into a JSON report: overview, per-column\n\
                  statistics, missing-value ranking, correlations, and a row sample.\n\
                  Run as an HTTP upload service or one-shot on a local file."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP analysis service
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1:7878")]
        addr: String,
    },
    /// Analyze a CSV file and print the report as JSON
    Analyze {
        /// Path to the CSV file
        path: PathBuf,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve { addr } => csvsight::server::serve(&addr),
        Command::Analyze { path, pretty } => {
            let bytes = std::fs::read(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let df = csvsight::ingest::ingest(&bytes)?;
            let report = csvsight::report::analyze(&df)?;
            let rendered = if pretty {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };
            println!("{}", rendered);
            Ok(())
        }
    }
}
