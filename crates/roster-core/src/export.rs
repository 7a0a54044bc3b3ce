//! Export row shape for spreadsheet/document exporters
//!
//! The core does not write file formats. It flattens the grouped guest list
//! into numbered rows with a highlight flag for split stays, and exporters
//! take it from there.

use serde::Serialize;

use crate::anomalies::SplitStayIndex;
use crate::guest_list::{flatten, GuestSection};
use crate::models::ReconciledRecord;

/// One exported guest row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    /// 1-based position in display order
    pub number: usize,
    pub agency: String,
    pub hotel: String,
    pub reservation_code: String,
    pub full_name: String,
    pub birth_date: String,
    pub flight_date: String,
    pub room_type: String,
    pub meal_plan: String,
    pub check_in: String,
    pub check_out: String,
    pub nights: Option<u32>,
    pub passport_number: String,
    pub age: Option<u32>,
    pub nationality: String,
    /// Reservation spans more than one hotel
    pub highlighted: bool,
}

impl ExportRow {
    /// Column headers in row order (excluding the highlight flag)
    pub const HEADERS: [&'static str; 15] = [
        "#",
        "Agency",
        "Hotel",
        "Reservation",
        "Full Name",
        "Birth Date",
        "Flight Date",
        "Room Type",
        "Meal Plan",
        "Check-in",
        "Check-out",
        "Nights",
        "Passport",
        "Age",
        "Nationality",
    ];

    fn from_record(number: usize, record: &ReconciledRecord, split_stays: &SplitStayIndex) -> Self {
        Self {
            number,
            agency: record.agency.clone().unwrap_or_default(),
            hotel: record.hotel.clone(),
            reservation_code: record.reservation_code.clone(),
            full_name: record.full_name.clone(),
            birth_date: record.birth_date.clone(),
            flight_date: record.flight_date.clone(),
            room_type: record.room_type.clone(),
            meal_plan: record.meal_plan.clone(),
            check_in: record.check_in.clone(),
            check_out: record.check_out.clone(),
            nights: record.nights,
            passport_number: record.passport_number.clone(),
            age: record.age,
            nationality: record.nationality.clone(),
            highlighted: split_stays.is_flagged(record),
        }
    }

    /// Cell values in `HEADERS` order; absent numbers are blank
    pub fn cells(&self) -> Vec<String> {
        let opt = |v: Option<u32>| v.map(|n| n.to_string()).unwrap_or_default();
        vec![
            self.number.to_string(),
            self.agency.clone(),
            self.hotel.clone(),
            self.reservation_code.clone(),
            self.full_name.clone(),
            self.birth_date.clone(),
            self.flight_date.clone(),
            self.room_type.clone(),
            self.meal_plan.clone(),
            self.check_in.clone(),
            self.check_out.clone(),
            opt(self.nights),
            self.passport_number.clone(),
            opt(self.age),
            self.nationality.clone(),
        ]
    }
}

/// Totals line appended by exporters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub total_records: usize,
    pub highlighted_records: usize,
}

/// Everything an exporter needs
#[derive(Debug, Clone, Default, Serialize)]
pub struct GuestExport {
    pub rows: Vec<ExportRow>,
    pub summary: ExportSummary,
}

impl GuestExport {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Flatten the grouped view into numbered export rows
pub fn export_rows(sections: &[GuestSection<'_>], split_stays: &SplitStayIndex) -> GuestExport {
    let rows: Vec<ExportRow> = flatten(sections)
        .into_iter()
        .enumerate()
        .map(|(i, record)| ExportRow::from_record(i + 1, record, split_stays))
        .collect();

    let summary = ExportSummary {
        total_records: rows.len(),
        highlighted_records: rows.iter().filter(|r| r.highlighted).count(),
    };

    GuestExport { rows, summary }
}
