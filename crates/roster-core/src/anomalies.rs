//! Split-stay detection
//!
//! A reservation whose reconciled records reference more than one hotel is
//! legitimate (the guests move mid-trip) but worth flagging in the guest
//! list and exports.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::models::{BookingSnapshot, ReconciledRecord};

/// One flagged reservation and the hotels it spans
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitStay {
    pub reservation_code: String,
    /// Distinct hotels in first-seen order
    pub hotels: Vec<String>,
}

/// Membership index of reservation codes spanning multiple hotels
///
/// Built once from the full reconciled set, never from a filtered view, so
/// filtering the table does not hide the flag.
#[derive(Debug, Clone, Default)]
pub struct SplitStayIndex {
    stays: Vec<SplitStay>,
    codes: HashSet<String>,
}

impl SplitStayIndex {
    pub fn build(records: &[ReconciledRecord]) -> Self {
        let mut order: Vec<&str> = Vec::new();
        let mut hotels: HashMap<&str, Vec<&str>> = HashMap::new();

        for record in records {
            let code = record.reservation_code.as_str();
            let seen = hotels.entry(code).or_insert_with(|| {
                order.push(code);
                Vec::new()
            });
            if !seen.contains(&record.hotel.as_str()) {
                seen.push(record.hotel.as_str());
            }
        }

        let stays: Vec<SplitStay> = order
            .into_iter()
            .filter_map(|code| {
                let code_hotels = hotels.remove(code)?;
                (code_hotels.len() > 1).then(|| SplitStay {
                    reservation_code: code.to_string(),
                    hotels: code_hotels.into_iter().map(str::to_string).collect(),
                })
            })
            .collect();

        let codes = stays.iter().map(|s| s.reservation_code.clone()).collect();
        Self { stays, codes }
    }

    pub fn contains(&self, reservation_code: &str) -> bool {
        self.codes.contains(reservation_code)
    }

    /// Whether a row should be highlighted
    pub fn is_flagged(&self, record: &BookingSnapshot) -> bool {
        self.contains(&record.reservation_code)
    }

    pub fn stays(&self) -> &[SplitStay] {
        &self.stays
    }

    pub fn len(&self) -> usize {
        self.stays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stays.is_empty()
    }
}
