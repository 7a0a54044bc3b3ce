//! Reconciliation engine
//!
//! Collapses raw per-email snapshots into the current truth per reservation
//! code:
//! - A code with any CANCELLATION snapshot is dropped entirely, across all
//!   passengers and hotels, whatever the timestamps say.
//! - Otherwise only the snapshots carrying the code's latest email timestamp
//!   survive. Ties are all kept.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, info};

use crate::dates;
use crate::models::{BookingSnapshot, ReconciledRecord};

/// Counts describing one reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    pub input_snapshots: usize,
    pub cancelled_codes: usize,
    /// Snapshots dropped because their code was cancelled
    pub cancelled_snapshots: usize,
    /// Snapshots dropped because a newer email exists for their code
    pub superseded_snapshots: usize,
    pub kept_records: usize,
    pub reservation_codes: usize,
    /// Snapshots whose email timestamp could not be parsed
    pub unparsable_timestamps: usize,
}

/// Reconcile a raw snapshot batch
pub fn reconcile(snapshots: Vec<BookingSnapshot>) -> Vec<ReconciledRecord> {
    reconcile_with_summary(snapshots).0
}

/// Reconcile a raw snapshot batch and report what happened
///
/// Output order is deterministic: reservation codes in order of first
/// appearance, and input order within a code.
pub fn reconcile_with_summary(
    snapshots: Vec<BookingSnapshot>,
) -> (Vec<ReconciledRecord>, ReconcileSummary) {
    let mut summary = ReconcileSummary {
        input_snapshots: snapshots.len(),
        ..Default::default()
    };

    let cancelled: HashSet<String> = snapshots
        .iter()
        .filter(|s| s.status.is_cancellation())
        .map(|s| s.reservation_code.clone())
        .collect();
    summary.cancelled_codes = cancelled.len();

    // Partition live snapshots by code, remembering first-seen order
    let mut code_order: Vec<String> = Vec::new();
    let mut by_code: HashMap<String, Vec<(NaiveDateTime, BookingSnapshot)>> = HashMap::new();

    for snapshot in snapshots {
        if cancelled.contains(&snapshot.reservation_code) {
            summary.cancelled_snapshots += 1;
            continue;
        }

        let instant = match snapshot.email_instant() {
            Some(instant) => instant,
            None => {
                summary.unparsable_timestamps += 1;
                dates::timestamp_or_min(&snapshot.email_timestamp)
            }
        };

        let partition = by_code
            .entry(snapshot.reservation_code.clone())
            .or_insert_with(|| {
                code_order.push(snapshot.reservation_code.clone());
                Vec::new()
            });
        partition.push((instant, snapshot));
    }

    let mut records = Vec::new();
    for code in &code_order {
        let Some(partition) = by_code.remove(code) else {
            continue;
        };

        let Some(latest) = partition.iter().map(|(instant, _)| *instant).max() else {
            continue;
        };

        let before = records.len();
        records.extend(
            partition
                .into_iter()
                .filter(|(instant, _)| *instant == latest)
                .map(|(_, snapshot)| ReconciledRecord::new(snapshot)),
        );
        let kept = records.len() - before;
        debug!(code = %code, latest = %latest, kept, "Reconciled reservation");
    }

    summary.reservation_codes = code_order.len();
    summary.kept_records = records.len();
    summary.superseded_snapshots =
        summary.input_snapshots - summary.cancelled_snapshots - summary.kept_records;

    info!(
        input = summary.input_snapshots,
        cancelled_codes = summary.cancelled_codes,
        superseded = summary.superseded_snapshots,
        kept = summary.kept_records,
        "Reconciled booking snapshots"
    );

    (records, summary)
}
