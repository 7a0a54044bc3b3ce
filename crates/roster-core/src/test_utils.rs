//! Test utilities for roster-core
//!
//! Builders for booking snapshots so tests only spell out the fields they
//! care about.

use crate::models::{BookingSnapshot, BookingStatus, ReconciledRecord};
use crate::reconcile::reconcile;

/// Fluent builder for `BookingSnapshot`
pub struct SnapshotBuilder {
    snapshot: BookingSnapshot,
}

impl SnapshotBuilder {
    pub fn new(code: &str, passport: &str) -> Self {
        Self {
            snapshot: BookingSnapshot {
                flight_date: "05.01.25".to_string(),
                email_timestamp: "2025-01-01 10:00:00".to_string(),
                status: BookingStatus::NewBooking,
                reservation_code: code.to_string(),
                gender: "Mr.".to_string(),
                full_name: format!("PASSENGER {}", passport),
                birth_date: "1980-01-01".to_string(),
                age: Some(45),
                passport_number: passport.to_string(),
                nationality: "RUS".to_string(),
                agency: Some("Pegas".to_string()),
                check_in: "2025-01-05".to_string(),
                check_out: "2025-01-12".to_string(),
                nights: Some(7),
                hotel: "Hotel A".to_string(),
                meal_plan: "AI".to_string(),
                room_type: "DBL".to_string(),
                remarks: String::new(),
            },
        }
    }

    pub fn status(mut self, status: BookingStatus) -> Self {
        self.snapshot.status = status;
        self
    }

    pub fn timestamp(mut self, ts: &str) -> Self {
        self.snapshot.email_timestamp = ts.to_string();
        self
    }

    pub fn hotel(mut self, hotel: &str) -> Self {
        self.snapshot.hotel = hotel.to_string();
        self
    }

    pub fn agency(mut self, agency: Option<&str>) -> Self {
        self.snapshot.agency = agency.map(str::to_string);
        self
    }

    pub fn flight_date(mut self, date: &str) -> Self {
        self.snapshot.flight_date = date.to_string();
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.snapshot.full_name = name.to_string();
        self
    }

    pub fn nights(mut self, nights: Option<u32>) -> Self {
        self.snapshot.nights = nights;
        self
    }

    pub fn build(self) -> BookingSnapshot {
        self.snapshot
    }
}

/// Reconcile snapshots that are all distinct live bookings
///
/// Every snapshot shares the same default timestamp, so nothing is
/// superseded as long as no code is cancelled.
pub fn live_records(snapshots: Vec<BookingSnapshot>) -> Vec<ReconciledRecord> {
    reconcile(snapshots)
}

/// A JSON batch as the extraction service would return it
pub fn sample_batch_json() -> &'static str {
    crate::extract::SAMPLE_BATCH
}
