//! Guest list table: filter, sort, and group into display sections

use std::collections::HashMap;

use serde::Serialize;

use crate::collate::locale_cmp;
use crate::filter::FilterContext;
use crate::models::ReconciledRecord;

/// What the table sections are keyed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    Hotel,
    FlightDate,
}

impl GroupBy {
    /// Group by hotel unless a single hotel is selected, then by flight date
    pub fn for_filters(filters: &FilterContext) -> Self {
        if filters.hotel.is_some() {
            Self::FlightDate
        } else {
            Self::Hotel
        }
    }

    fn key<'a>(&self, record: &'a ReconciledRecord) -> &'a str {
        match self {
            Self::Hotel => &record.hotel,
            Self::FlightDate => &record.flight_date,
        }
    }
}

/// A titled block of guest rows
#[derive(Debug, Clone, Serialize)]
pub struct GuestSection<'a> {
    pub label: String,
    pub records: Vec<&'a ReconciledRecord>,
}

impl GuestSection<'_> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Build the grouped guest list for the current filters
///
/// Records are filtered by flight date, hotel, agency and search text, then
/// sorted by the active sort key (stable, so input order breaks ties), then
/// grouped. Sections come back ordered by label.
pub fn build_guest_list<'a>(
    records: &'a [ReconciledRecord],
    filters: &FilterContext,
) -> Vec<GuestSection<'a>> {
    let mut rows: Vec<&ReconciledRecord> = records
        .iter()
        .filter(|r| filters.flight_date.matches(r) && filters.matches_table(r))
        .collect();

    if let Some(sort) = filters.sort {
        rows.sort_by(|a, b| sort.compare(a, b));
    }

    let group_by = GroupBy::for_filters(filters);
    let mut sections: Vec<GuestSection<'a>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in rows {
        let key = group_by.key(record);
        let slot = *index.entry(key).or_insert_with(|| {
            sections.push(GuestSection {
                label: key.to_string(),
                records: Vec::new(),
            });
            sections.len() - 1
        });
        sections[slot].records.push(record);
    }

    sections.sort_by(|a, b| locale_cmp(&a.label, &b.label));
    sections
}

/// Flatten sections back into display order, e.g. for export
pub fn flatten<'a>(sections: &[GuestSection<'a>]) -> Vec<&'a ReconciledRecord> {
    sections
        .iter()
        .flat_map(|s| s.records.iter().copied())
        .collect()
}
