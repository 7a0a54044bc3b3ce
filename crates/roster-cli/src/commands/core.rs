//! Shared command utilities
//!
//! This module contains:
//! - `load_batch` - Read a batch file and run it through the load pipeline
//! - `build_filters` - Turn filter flags into a `FilterContext`
//! - `print_json` - Pretty-print any serializable view

use std::path::Path;

use anyhow::{Context, Result};
use roster_core::{
    load_roster, ExtractorClient, Extractor, FilterContext, FlightDateFilter, LoadState, Roster,
    RosterConfig, SortConfig, SortDirection, SortKey,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::FilterArgs;

/// Read a batch file and reconcile it
pub async fn load_batch(file: &Path, config: &RosterConfig) -> Result<Roster> {
    let text = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read batch file: {}", file.display()))?;

    let extractor = ExtractorClient::from_config(&config.extraction);
    if !extractor.health_check().await {
        anyhow::bail!("Extraction backend '{}' is not available", extractor.name());
    }
    debug!(backend = extractor.name(), file = %file.display(), "Loading batch");

    match load_roster(&extractor, &text, config.extraction.max_retries).await {
        LoadState::Ready(roster) => {
            info!(
                records = roster.len(),
                fingerprint = %&roster.fingerprint()[..12],
                "Batch reconciled"
            );
            Ok(roster)
        }
        LoadState::Failed(message) => anyhow::bail!(message),
        LoadState::Pending => anyhow::bail!("Extraction did not complete"),
    }
}

/// Build the filter context from command-line flags
pub fn build_filters(args: &FilterArgs) -> Result<FilterContext> {
    let flight_date: FlightDateFilter = args.flight_date.parse()?;

    let sort = match args.sort.as_deref() {
        Some(key) => {
            let key: SortKey = key.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            let direction = if args.desc {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            };
            Some(SortConfig::new(key, direction))
        }
        None => None,
    };

    Ok(FilterContext::new()
        .flight_date(flight_date)
        .hotel(args.hotel.as_deref())
        .agency(args.agency.as_deref())
        .search(args.search.as_deref())
        .sort(sort))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
