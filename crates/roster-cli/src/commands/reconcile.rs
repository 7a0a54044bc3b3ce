//! Reconcile command implementation

use std::path::Path;

use anyhow::Result;
use roster_core::RosterConfig;

use super::{load_batch, print_json};

pub async fn cmd_reconcile(file: &Path, config: &RosterConfig, json: bool) -> Result<()> {
    let roster = load_batch(file, config).await?;

    if json {
        return print_json(&roster.records());
    }

    let summary = roster.summary();

    println!();
    println!("🔄 Reconciliation Summary");
    println!("   Batch: {}", file.display());
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Snapshots read:        {:>6}", summary.input_snapshots);
    println!(
        "   Cancelled codes:       {:>6}  ({} snapshots dropped)",
        summary.cancelled_codes, summary.cancelled_snapshots
    );
    println!("   Superseded snapshots:  {:>6}", summary.superseded_snapshots);
    println!(
        "   Records kept:          {:>6}  ({} reservations)",
        summary.kept_records, summary.reservation_codes
    );

    if summary.unparsable_timestamps > 0 {
        println!(
            "   ⚠️  {} snapshot(s) had an unreadable email timestamp",
            summary.unparsable_timestamps
        );
    }

    println!("   Fingerprint: {}", roster.fingerprint());
    println!();
    Ok(())
}
