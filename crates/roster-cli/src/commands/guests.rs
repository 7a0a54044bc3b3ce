//! Guest list and anomaly command implementations

use std::path::Path;

use anyhow::Result;
use roster_core::{build_guest_list, GroupBy, RosterConfig};

use super::{build_filters, load_batch, print_json, truncate};
use crate::cli::FilterArgs;

pub async fn cmd_guests(
    file: &Path,
    config: &RosterConfig,
    args: &FilterArgs,
    json: bool,
) -> Result<()> {
    let roster = load_batch(file, config).await?;
    let filters = build_filters(args)?;
    let sections = build_guest_list(roster.records(), &filters);

    if json {
        return print_json(&sections);
    }

    if sections.is_empty() {
        println!("No guests match the current filters.");
        return Ok(());
    }

    let split_stays = roster.split_stays();
    let group_by = GroupBy::for_filters(&filters);

    println!();
    println!(
        "   {:1} {:12} │ {:10} │ {:28} │ {:12} │ {:10} │ {:>6}",
        "", "Agency", "Reserva", "Name", "Passport", "Check-in", "Nights"
    );

    for section in &sections {
        println!();
        match group_by {
            GroupBy::Hotel => println!("🏨 {} ({})", section.label, section.len()),
            GroupBy::FlightDate => println!("✈️  {} ({})", section.label, section.len()),
        }
        println!("   ──────────────────────────────────────────────────────────────────────────────────────────────");

        for record in &section.records {
            let flag = if split_stays.is_flagged(record) { "⚠" } else { " " };
            println!(
                "   {:1} {:12} │ {:10} │ {:28} │ {:12} │ {:10} │ {:>6}",
                flag,
                truncate(record.agency.as_deref().unwrap_or("-"), 12),
                truncate(&record.reservation_code, 10),
                truncate(&record.full_name, 28),
                truncate(&record.passport_number, 12),
                truncate(&record.check_in, 10),
                record.nights.map_or_else(|| "-".to_string(), |n| n.to_string()),
            );
        }
    }

    let total: usize = sections.iter().map(|s| s.len()).sum();
    println!();
    println!("   {} guest row(s)", total);
    if !split_stays.is_empty() {
        println!("   ⚠ = reservation spans more than one hotel");
    }
    println!();
    Ok(())
}

pub async fn cmd_anomalies(file: &Path, config: &RosterConfig, json: bool) -> Result<()> {
    let roster = load_batch(file, config).await?;
    let stays = roster.split_stays().stays();

    if json {
        return print_json(&stays);
    }

    if stays.is_empty() {
        println!("✅ No reservation spans more than one hotel.");
        return Ok(());
    }

    println!();
    println!("⚠️  Split Stays");
    println!("   ─────────────────────────────────────────────────────────────");
    for stay in stays {
        println!("   {:12} {}", stay.reservation_code, stay.hotels.join(" → "));
    }
    println!();
    Ok(())
}
