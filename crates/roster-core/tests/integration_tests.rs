//! Integration tests for roster-core
//!
//! These tests exercise the full extract → reconcile → dashboard → export
//! workflow against the bundled sample batch.

use roster_core::{
    combine_pages, load_roster, parse_batch, reconcile, BookingStatus, ExtractorClient,
    FilterContext, FlightDateFilter, GroupBy, LoadState, MockExtractor, Roster, RosterConfig,
    SortConfig, SortDirection, SortKey,
};

/// Sample batch covering:
/// - A solo traveler at Venetur Margarita (R100)
/// - An amended reservation that moves one guest between hotels (R200)
/// - A booking without an agency (R300)
/// - A booking cancelled by a later email (R400)
fn sample_batch() -> &'static str {
    roster_core::extract::SAMPLE_BATCH
}

fn sample_roster() -> Roster {
    Roster::from_snapshots(parse_batch(sample_batch()).expect("sample batch parses"))
}

// =============================================================================
// Load Pipeline
// =============================================================================

#[tokio::test]
async fn test_full_load_workflow() {
    let client = ExtractorClient::mock();
    let state = load_roster(&client, "page text", 0).await;

    let LoadState::Ready(roster) = state else {
        panic!("expected a ready roster");
    };

    let summary = roster.summary();
    assert_eq!(summary.input_snapshots, 8);
    assert_eq!(summary.cancelled_codes, 1);
    assert_eq!(summary.cancelled_snapshots, 2);
    assert_eq!(summary.superseded_snapshots, 2);
    assert_eq!(summary.kept_records, 4);
    assert_eq!(summary.reservation_codes, 3);
    assert_eq!(summary.unparsable_timestamps, 0);
}

#[tokio::test]
async fn test_passthrough_accepts_combined_pages() {
    let page_two = r#"[{"codigoReserva": "R900", "pasaporte": "P9", "hotel": "Hotel Z",
        "fechaVuelo": "20.01.25", "fechaHoraCorreo": "2025-01-05 10:00:00", "estatus": "NEW BOOKING"}]"#;
    let text = combine_pages(&[sample_batch(), page_two]);

    let client = ExtractorClient::from_config(&RosterConfig::default().extraction);
    let state = load_roster(&client, &text, 0).await;

    let roster = state.roster().expect("roster should load");
    assert_eq!(roster.len(), 5);
    assert_eq!(
        roster.flight_dates(),
        vec!["all", "05.01.25", "12.01.25", "20.01.25"]
    );
}

#[tokio::test]
async fn test_failed_extraction_shows_no_data() {
    let state = load_roster(&MockExtractor::failing("rate limited"), "page text", 0).await;
    assert!(state.roster().is_none());
    assert!(state.error().is_some());
}

// =============================================================================
// Reconciliation
// =============================================================================

#[test]
fn test_cancelled_reservation_is_gone() {
    let roster = sample_roster();
    assert!(roster
        .records()
        .iter()
        .all(|r| r.reservation_code != "R400"));
}

#[test]
fn test_amendment_replaces_earlier_email() {
    let roster = sample_roster();
    let r200: Vec<_> = roster
        .records()
        .iter()
        .filter(|r| r.reservation_code == "R200")
        .collect();

    // The amendment only lists Olga, at two hotels; Pavel's earlier row is superseded
    assert_eq!(r200.len(), 2);
    assert!(r200.iter().all(|r| r.full_name == "OLGA SMIRNOVA"));
    assert!(r200.iter().all(|r| r.status == BookingStatus::Amend));
}

#[test]
fn test_reconcile_is_idempotent_on_sample() {
    let roster = sample_roster();
    let again = reconcile(
        roster
            .records()
            .iter()
            .map(|r| r.snapshot().clone())
            .collect(),
    );
    assert_eq!(again, roster.records());
}

// =============================================================================
// Dashboard
// =============================================================================

#[test]
fn test_dashboard_stats() {
    let roster = sample_roster();
    let view = roster.dashboard(&FilterContext::new(), &RosterConfig::default());

    assert_eq!(view.stats.total_bookings, 4);
    assert_eq!(view.stats.total_passengers, 3);
    assert_eq!(view.stats.unique_hotels, 2);
    // R100 alone at Venetur, and R200 (only Olga left) partly at Venetur
    assert_eq!(view.stats.solo_travelers, 2);

    let nights: Vec<(&str, u64)> = view
        .nights_by_hotel
        .iter()
        .map(|(h, n)| (h.as_str(), *n))
        .collect();
    assert_eq!(
        nights,
        vec![("Hesperia Isla Margarita", 11), ("Venetur Margarita", 10)]
    );

    let agencies: Vec<(&str, usize)> = view
        .bookings_by_agency
        .iter()
        .map(|g| (g.label.as_str(), g.count))
        .collect();
    assert_eq!(agencies, vec![("Anex", 2), ("Pegas", 1), ("Unknown", 1)]);

    let unique: Vec<&str> = view
        .unique_passengers_by_agency
        .iter()
        .map(|g| g.label.as_str())
        .collect();
    assert!(unique.contains(&"Sin Agencia"));

    assert_eq!(view.agency_options, vec!["all", "Anex", "Pegas"]);
    assert_eq!(view.split_stays.len(), 1);
}

#[test]
fn test_flight_date_filter_scopes_stats() {
    let roster = sample_roster();
    let filters = FilterContext::new().flight_date(FlightDateFilter::Date("12.01.25".into()));
    let view = roster.dashboard(&filters, &RosterConfig::default());

    assert_eq!(view.stats.total_bookings, 1);
    assert_eq!(view.stats.solo_travelers, 0);
    assert_eq!(view.occupancy_by_hotel.len(), 1);
    assert_eq!(view.occupancy_by_hotel[0].percentage, 100.0);
    // Date and selector options always come from the full set
    assert_eq!(view.flight_dates.len(), 3);
    assert_eq!(
        view.hotel_options,
        vec!["all", "Hesperia Isla Margarita", "Venetur Margarita"]
    );
    assert_eq!(view.agency_options, vec!["all", "Anex", "Pegas"]);
}

#[test]
fn test_unknown_flight_date_gives_empty_view() {
    let roster = sample_roster();
    let filters = FilterContext::new().flight_date(FlightDateFilter::Date("01.01.30".into()));
    let view = roster.dashboard(&filters, &RosterConfig::default());

    assert_eq!(view.stats.total_bookings, 0);
    assert!(view.occupancy_by_hotel.is_empty());
    assert!(view.guest_sections.is_empty());
}

// =============================================================================
// Guest List and Export
// =============================================================================

#[test]
fn test_guest_list_grouped_by_hotel() {
    let roster = sample_roster();
    let view = roster.dashboard(&FilterContext::new(), &RosterConfig::default());

    assert_eq!(view.group_by, GroupBy::Hotel);
    let labels: Vec<&str> = view.guest_sections.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Hesperia Isla Margarita", "Venetur Margarita"]);
    assert_eq!(view.guest_count(), 4);
}

#[test]
fn test_hotel_filter_groups_by_flight_date() {
    let roster = sample_roster();
    let filters = FilterContext::new().hotel(Some("Hesperia Isla Margarita"));
    let view = roster.dashboard(&filters, &RosterConfig::default());

    assert_eq!(view.group_by, GroupBy::FlightDate);
    let labels: Vec<&str> = view.guest_sections.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["05.01.25", "12.01.25"]);
}

#[test]
fn test_export_highlights_split_stays_after_filtering() {
    let roster = sample_roster();
    let filters = FilterContext::new()
        .hotel(Some("Venetur Margarita"))
        .sort(Some(SortConfig::new(SortKey::FullName, SortDirection::Desc)));

    let export = roster.export(&filters);
    assert_eq!(export.summary.total_records, 2);
    assert_eq!(export.summary.highlighted_records, 1);

    let first = &export.rows[0];
    assert_eq!(first.number, 1);
    assert_eq!(first.full_name, "OLGA SMIRNOVA");
    assert!(first.highlighted);
    assert!(!export.rows[1].highlighted);
}

#[test]
fn test_search_matches_agency() {
    let roster = sample_roster();
    let export = roster.export(&FilterContext::new().search(Some("anex")));
    assert_eq!(export.summary.total_records, 2);
    assert!(export.rows.iter().all(|r| r.reservation_code == "R200"));
}
