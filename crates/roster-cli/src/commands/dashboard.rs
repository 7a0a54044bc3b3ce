//! Dashboard and flight date command implementations

use std::path::Path;

use anyhow::Result;
use roster_core::{FilterContext, GroupCount, RosterConfig};

use super::{load_batch, print_json, truncate};

pub async fn cmd_dashboard(
    file: &Path,
    config: &RosterConfig,
    flight_date: &str,
    json: bool,
) -> Result<()> {
    let roster = load_batch(file, config).await?;
    let filters = FilterContext::new().flight_date(flight_date.parse()?);
    let view = roster.dashboard(&filters, config);

    if json {
        return print_json(&view);
    }

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│           ✈️  Roster Dashboard           │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Flight date:     {}", view.filters.flight_date.as_str());
    println!("  Passengers:      {}", view.stats.total_passengers);
    println!(
        "  Solo travelers:  {}  (at \"{}\")",
        view.stats.solo_travelers, config.dashboard.solo_hotel
    );
    println!("  Hotels:          {}", view.stats.unique_hotels);
    println!("  Bookings:        {}", view.stats.total_bookings);

    print_group_counts("🏨 Occupancy by Hotel", &view.occupancy_by_hotel);
    print_group_counts("🏢 Bookings by Agency", &view.bookings_by_agency);
    print_group_counts("👥 Unique Passengers by Agency", &view.unique_passengers_by_agency);

    if !view.nights_by_hotel.is_empty() {
        println!();
        println!("  🌙 Nights by Hotel");
        for (hotel, nights) in &view.nights_by_hotel {
            println!("     {:30} │ {:>6}", truncate(hotel, 30), nights);
        }
    }

    if !view.split_stays.is_empty() {
        println!();
        println!(
            "  ⚠️  {} reservation(s) span more than one hotel (see `roster anomalies`)",
            view.split_stays.len()
        );
    }

    println!();
    Ok(())
}

fn print_group_counts(title: &str, groups: &[GroupCount]) {
    if groups.is_empty() {
        return;
    }

    println!();
    println!("  {}", title);
    for group in groups {
        println!(
            "     {:30} │ {:>5} │ {:>5.1}%",
            truncate(&group.label, 30),
            group.count,
            group.percentage
        );
    }
}

pub async fn cmd_dates(file: &Path, config: &RosterConfig) -> Result<()> {
    let roster = load_batch(file, config).await?;

    println!();
    println!("📅 Flight Dates");
    println!("   ─────────────────────────────────────────────────────────────");
    for date in roster.flight_dates() {
        println!("   {}", date);
    }
    println!();
    Ok(())
}
