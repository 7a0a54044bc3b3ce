//! Export command implementation

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use roster_core::RosterConfig;

use super::{build_filters, load_batch};
use crate::cli::FilterArgs;

/// Write the filtered, grouped guest list as numbered export rows (JSON)
pub async fn cmd_export(
    file: &Path,
    config: &RosterConfig,
    output: &Path,
    args: &FilterArgs,
) -> Result<()> {
    // Check output doesn't already exist
    if output.exists() {
        anyhow::bail!(
            "Output file already exists: {}\nUse a different filename or remove the existing file.",
            output.display()
        );
    }

    let roster = load_batch(file, config).await?;
    let filters = build_filters(args)?;

    println!("📦 Exporting guest list...");

    let export = roster.export(&filters);
    if export.is_empty() {
        println!("   No guests match the current filters; writing an empty export.");
    }

    let json =
        serde_json::to_string_pretty(&export).context("Failed to serialize export to JSON")?;

    let mut out = File::create(output)
        .with_context(|| format!("Failed to create output file: {}", output.display()))?;
    out.write_all(json.as_bytes())?;

    println!("✅ Export written to: {}", output.display());
    println!("   Rows: {}", export.summary.total_records);
    println!("   Split stays highlighted: {}", export.summary.highlighted_records);

    Ok(())
}
