//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Roster - Reconcile booking emails into a live guest roster
#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Booking reconciliation dashboard for travel agency emails", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to ~/.config/roster/roster.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Guest table filters shared by several commands
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Flight date to show (e.g. 05.01.25), or "all"
    #[arg(long, default_value = "all")]
    pub flight_date: String,

    /// Only show this hotel (exact name)
    #[arg(long)]
    pub hotel: Option<String>,

    /// Only show this agency (exact name)
    #[arg(long)]
    pub agency: Option<String>,

    /// Free text matched against name, passport, reservation and agency
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort column: agency, name, reservation, flight, passport, hotel,
    /// check_in, check_out, nights, age, nationality
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reconcile a batch and show what was kept and dropped
    Reconcile {
        /// Batch file (extraction response JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Print the reconciled records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show stat cards and charts
    Dashboard {
        /// Batch file (extraction response JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Flight date to show (e.g. 05.01.25), or "all"
        #[arg(long, default_value = "all")]
        flight_date: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the grouped guest list
    Guests {
        /// Batch file (extraction response JSON)
        #[arg(short, long)]
        file: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the guest list as export rows
    Export {
        /// Batch file (extraction response JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// List flight dates in chronological order
    Dates {
        /// Batch file (extraction response JSON)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// List reservations that span more than one hotel
    Anomalies {
        /// Batch file (extraction response JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
