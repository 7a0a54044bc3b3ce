//! Aggregate views over reconciled records
//!
//! All functions are pure: they take the (already filtered) records and
//! return fresh values. Empty input gives zero counts, empty lists, and
//! percentages of 0 instead of dividing by zero.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::collate::contains_ci;
use crate::dates::compare_flight_dates;
use crate::filter::ALL;
use crate::models::ReconciledRecord;

/// One bar of a grouped count chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupCount {
    pub label: String,
    pub count: usize,
    /// Share of the view's total, 0 when the total is 0
    pub percentage: f64,
}

/// Scalar statistics shown on the dashboard cards
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Distinct (reservation code, passport) pairs
    pub total_passengers: usize,
    /// Single-passenger reservations staying at the configured hotel
    pub solo_travelers: usize,
    pub unique_hotels: usize,
    /// One per passenger-hotel stay
    pub total_bookings: usize,
}

pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Distinct flight dates in chronological order, with "all" first
pub fn unique_flight_dates<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a ReconciledRecord>,
{
    let distinct: HashSet<&str> = records.into_iter().map(|r| r.flight_date.as_str()).collect();
    let mut dates: Vec<&str> = distinct.into_iter().collect();
    dates.sort_by(|a, b| compare_flight_dates(a, b));

    std::iter::once(ALL.to_string())
        .chain(dates.into_iter().map(str::to_string))
        .collect()
}

pub fn total_unique_passengers<'a, I>(records: I) -> usize
where
    I: IntoIterator<Item = &'a ReconciledRecord>,
{
    records
        .into_iter()
        .map(|r| r.passenger_key())
        .collect::<HashSet<_>>()
        .len()
}

pub fn unique_hotels<'a, I>(records: I) -> usize
where
    I: IntoIterator<Item = &'a ReconciledRecord>,
{
    records
        .into_iter()
        .map(|r| r.hotel.as_str())
        .collect::<HashSet<_>>()
        .len()
}

pub fn total_bookings<'a, I>(records: I) -> usize
where
    I: IntoIterator<Item = &'a ReconciledRecord>,
{
    records.into_iter().count()
}

/// Count reservations with exactly one distinct passport where any stay is
/// at a hotel whose name contains `hotel_substring` (case-insensitive)
pub fn solo_travelers_at<'a, I>(records: I, hotel_substring: &str) -> usize
where
    I: IntoIterator<Item = &'a ReconciledRecord>,
{
    let needle = hotel_substring.to_lowercase();
    let mut by_code: HashMap<&str, (HashSet<&str>, bool)> = HashMap::new();

    for record in records {
        let (passports, at_hotel) = by_code
            .entry(record.reservation_code.as_str())
            .or_default();
        passports.insert(record.passport_number.as_str());
        *at_hotel |= contains_ci(&record.hotel, &needle);
    }

    by_code
        .values()
        .filter(|(passports, at_hotel)| passports.len() == 1 && *at_hotel)
        .count()
}

pub fn dashboard_stats<'a, I>(records: I, solo_hotel: &str) -> DashboardStats
where
    I: IntoIterator<Item = &'a ReconciledRecord>,
    I::IntoIter: Clone,
{
    let records = records.into_iter();
    DashboardStats {
        total_passengers: total_unique_passengers(records.clone()),
        solo_travelers: solo_travelers_at(records.clone(), solo_hotel),
        unique_hotels: unique_hotels(records.clone()),
        total_bookings: total_bookings(records),
    }
}

/// Order-preserving tally keyed by group label
#[derive(Default)]
struct Tally<'a> {
    order: Vec<&'a str>,
    members: HashMap<&'a str, HashSet<(&'a str, &'a str)>>,
    counts: HashMap<&'a str, usize>,
}

impl<'a> Tally<'a> {
    fn add(&mut self, label: &'a str, member: (&'a str, &'a str)) {
        if !self.counts.contains_key(label) {
            self.order.push(label);
        }
        *self.counts.entry(label).or_insert(0) += 1;
        self.members.entry(label).or_default().insert(member);
    }

    /// Groups sorted by count descending; ties keep first-seen order
    fn rank(self, distinct: bool, total: usize) -> Vec<GroupCount> {
        let mut groups: Vec<GroupCount> = self
            .order
            .iter()
            .map(|label| {
                let count = if distinct {
                    self.members.get(label).map_or(0, HashSet::len)
                } else {
                    self.counts.get(label).copied().unwrap_or(0)
                };
                GroupCount {
                    label: label.to_string(),
                    count,
                    percentage: percentage(count, total),
                }
            })
            .collect();
        groups.sort_by(|a, b| b.count.cmp(&a.count));
        groups
    }
}

/// Stays per hotel, percentages of total bookings
pub fn occupancy_by_hotel<'a, I>(records: I, unknown_label: &str) -> Vec<GroupCount>
where
    I: IntoIterator<Item = &'a ReconciledRecord>,
{
    let mut tally = Tally::default();
    let mut total = 0;
    for record in records {
        tally.add(record.hotel_or(unknown_label), record.passenger_key());
        total += 1;
    }
    tally.rank(false, total)
}

/// Bookings per agency, percentages of total bookings
pub fn bookings_by_agency<'a, I>(records: I, unknown_label: &str) -> Vec<GroupCount>
where
    I: IntoIterator<Item = &'a ReconciledRecord>,
{
    let mut tally = Tally::default();
    let mut total = 0;
    for record in records {
        tally.add(record.agency_or(unknown_label), record.passenger_key());
        total += 1;
    }
    tally.rank(false, total)
}

/// Distinct passengers per agency, percentages of total distinct passengers
pub fn unique_passengers_by_agency<'a, I>(records: I, no_agency_label: &str) -> Vec<GroupCount>
where
    I: IntoIterator<Item = &'a ReconciledRecord>,
{
    let mut tally = Tally::default();
    let mut everyone = HashSet::new();
    for record in records {
        tally.add(record.agency_or(no_agency_label), record.passenger_key());
        everyone.insert(record.passenger_key());
    }
    tally.rank(true, everyone.len())
}

/// Total nights booked per hotel, most nights first
pub fn nights_by_hotel<'a, I>(records: I, unknown_label: &str) -> Vec<(String, u64)>
where
    I: IntoIterator<Item = &'a ReconciledRecord>,
{
    let mut order: Vec<&str> = Vec::new();
    let mut nights: HashMap<&str, u64> = HashMap::new();

    for record in records {
        let hotel = record.hotel_or(unknown_label);
        let entry = nights.entry(hotel).or_insert_with(|| {
            order.push(hotel);
            0
        });
        *entry += u64::from(record.nights.unwrap_or(0));
    }

    let mut totals: Vec<(String, u64)> = order
        .into_iter()
        .map(|hotel| (hotel.to_string(), nights.get(hotel).copied().unwrap_or(0)))
        .collect();
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
}

/// Hotel selector options: "all" then every distinct hotel, sorted
pub fn hotel_options<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a ReconciledRecord>,
{
    options(records.into_iter().map(|r| r.hotel.as_str()))
}

/// Agency selector options: "all" then every non-empty agency, sorted
pub fn agency_options<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a ReconciledRecord>,
{
    options(records.into_iter().filter_map(|r| r.agency.as_deref()))
}

fn options<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut distinct: Vec<&str> = values.collect::<HashSet<_>>().into_iter().collect();
    distinct.sort_unstable();
    std::iter::once(ALL.to_string())
        .chain(distinct.into_iter().map(str::to_string))
        .collect()
}
