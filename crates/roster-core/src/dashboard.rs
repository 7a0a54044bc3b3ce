//! Dashboard view model
//!
//! Everything one render of the dashboard needs, computed in a single pass
//! from the reconciled set and the active filters. Stat cards and charts
//! follow the flight date filter only; the guest table also applies the
//! hotel, agency and search filters. Selector options ignore every filter.

use serde::Serialize;

use crate::anomalies::{SplitStay, SplitStayIndex};
use crate::config::DashboardConfig;
use crate::filter::{filter_by_flight_date, FilterContext};
use crate::guest_list::{build_guest_list, GroupBy, GuestSection};
use crate::models::ReconciledRecord;
use crate::reports::{self, DashboardStats, GroupCount};

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView<'a> {
    /// Flight date options, "all" first
    pub flight_dates: Vec<String>,
    pub filters: FilterContext,
    pub stats: DashboardStats,
    pub occupancy_by_hotel: Vec<GroupCount>,
    pub bookings_by_agency: Vec<GroupCount>,
    pub unique_passengers_by_agency: Vec<GroupCount>,
    pub nights_by_hotel: Vec<(String, u64)>,
    pub hotel_options: Vec<String>,
    pub agency_options: Vec<String>,
    pub group_by: GroupBy,
    pub guest_sections: Vec<GuestSection<'a>>,
    /// Reservations spanning several hotels, from the unfiltered set
    pub split_stays: &'a [SplitStay],
}

impl<'a> DashboardView<'a> {
    pub fn build(
        records: &'a [ReconciledRecord],
        split_stays: &'a SplitStayIndex,
        filters: &FilterContext,
        config: &DashboardConfig,
    ) -> Self {
        let view = filter_by_flight_date(records, &filters.flight_date);
        let unknown = config.unknown_label.as_str();

        Self {
            flight_dates: reports::unique_flight_dates(records),
            filters: filters.clone(),
            stats: reports::dashboard_stats(view.iter().copied(), &config.solo_hotel),
            occupancy_by_hotel: reports::occupancy_by_hotel(view.iter().copied(), unknown),
            bookings_by_agency: reports::bookings_by_agency(view.iter().copied(), unknown),
            unique_passengers_by_agency: reports::unique_passengers_by_agency(
                view.iter().copied(),
                &config.no_agency_label,
            ),
            nights_by_hotel: reports::nights_by_hotel(view.iter().copied(), unknown),
            hotel_options: reports::hotel_options(records),
            agency_options: reports::agency_options(records),
            group_by: GroupBy::for_filters(filters),
            guest_sections: build_guest_list(records, filters),
            split_stays: split_stays.stays(),
        }
    }

    /// Rows shown in the guest table across all sections
    pub fn guest_count(&self) -> usize {
        self.guest_sections.iter().map(GuestSection::len).sum()
    }
}
