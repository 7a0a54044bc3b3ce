//! Roster CLI - Booking reconciliation dashboard
//!
//! Usage:
//!   roster reconcile --file batch.json     Reconcile a batch
//!   roster dashboard --file batch.json     Stat cards and charts
//!   roster guests --file batch.json        Grouped guest list
//!   roster export --file batch.json -o out.json

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use clap::Parser;
use roster_core::RosterConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config =
        RosterConfig::load_from(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command {
        Commands::Reconcile { file, json } => commands::cmd_reconcile(&file, &config, json).await,
        Commands::Dashboard {
            file,
            flight_date,
            json,
        } => commands::cmd_dashboard(&file, &config, &flight_date, json).await,
        Commands::Guests {
            file,
            filters,
            json,
        } => commands::cmd_guests(&file, &config, &filters, json).await,
        Commands::Export {
            file,
            output,
            filters,
        } => commands::cmd_export(&file, &config, &output, &filters).await,
        Commands::Dates { file } => commands::cmd_dates(&file, &config).await,
        Commands::Anomalies { file, json } => commands::cmd_anomalies(&file, &config, json).await,
    }
}
