//! Filter context for the aggregation views
//!
//! Every filter selection is carried explicitly in a `FilterContext` value
//! built with the builder methods below. The views never mutate it.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::collate::contains_ci;
use crate::models::{BookingSnapshot, ReconciledRecord};

/// Sentinel used by the flight date selector for "no filter"
pub const ALL: &str = "all";

/// Flight date selection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlightDateFilter {
    #[default]
    All,
    /// Exact string match against the snapshot's flight date
    Date(String),
}

impl FlightDateFilter {
    pub fn matches(&self, record: &BookingSnapshot) -> bool {
        match self {
            Self::All => true,
            Self::Date(date) => record.flight_date == *date,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL,
            Self::Date(date) => date,
        }
    }
}

impl std::str::FromStr for FlightDateFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s == ALL {
            Ok(Self::All)
        } else {
            Ok(Self::Date(s.to_string()))
        }
    }
}

/// Fields the guest list can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Agency,
    FullName,
    ReservationCode,
    FlightDate,
    Passport,
    Hotel,
    CheckIn,
    CheckOut,
    Nights,
    Age,
    Nationality,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Agency => "agency",
            Self::FullName => "full_name",
            Self::ReservationCode => "reservation_code",
            Self::FlightDate => "flight_date",
            Self::Passport => "passport",
            Self::Hotel => "hotel",
            Self::CheckIn => "check_in",
            Self::CheckOut => "check_out",
            Self::Nights => "nights",
            Self::Age => "age",
            Self::Nationality => "nationality",
        }
    }

    /// Compare two snapshots by this key, ascending
    ///
    /// Absent values compare as empty, i.e. before everything else.
    pub fn compare(&self, a: &BookingSnapshot, b: &BookingSnapshot) -> Ordering {
        match self {
            Self::Agency => a
                .agency
                .as_deref()
                .unwrap_or("")
                .cmp(b.agency.as_deref().unwrap_or("")),
            Self::FullName => a.full_name.cmp(&b.full_name),
            Self::ReservationCode => a.reservation_code.cmp(&b.reservation_code),
            Self::FlightDate => a.flight_date.cmp(&b.flight_date),
            Self::Passport => a.passport_number.cmp(&b.passport_number),
            Self::Hotel => a.hotel.cmp(&b.hotel),
            Self::CheckIn => a.check_in.cmp(&b.check_in),
            Self::CheckOut => a.check_out.cmp(&b.check_out),
            Self::Nights => a.nights.cmp(&b.nights),
            Self::Age => a.age.cmp(&b.age),
            Self::Nationality => a.nationality.cmp(&b.nationality),
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "agency" | "agencia" => Ok(Self::Agency),
            "full_name" | "name" | "nombre" => Ok(Self::FullName),
            "reservation_code" | "reservation" | "code" | "reserva" => Ok(Self::ReservationCode),
            "flight_date" | "flight" | "vuelo" => Ok(Self::FlightDate),
            "passport" | "pasaporte" => Ok(Self::Passport),
            "hotel" => Ok(Self::Hotel),
            "check_in" | "stay" => Ok(Self::CheckIn),
            "check_out" => Ok(Self::CheckOut),
            "nights" | "noches" => Ok(Self::Nights),
            "age" | "edad" => Ok(Self::Age),
            "nationality" => Ok(Self::Nationality),
            _ => Err(format!("Unknown sort key: {}", s)),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Active sort for the guest list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Next sort after the user selects `key`
    ///
    /// Selecting the key that is currently ascending flips it to descending;
    /// anything else starts ascending.
    pub fn toggle(current: Option<SortConfig>, key: SortKey) -> Self {
        let direction = match current {
            Some(c) if c.key == key && c.direction == SortDirection::Asc => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        Self { key, direction }
    }

    pub fn compare(&self, a: &BookingSnapshot, b: &BookingSnapshot) -> Ordering {
        let ord = self.key.compare(a, b);
        match self.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

/// All filter selections for one render of the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterContext {
    pub flight_date: FlightDateFilter,
    /// Exact hotel match; `None` shows every hotel
    pub hotel: Option<String>,
    /// Exact agency match; `None` shows every agency
    pub agency: Option<String>,
    /// Free text matched against name, passport, reservation code and agency
    pub search: Option<String>,
    pub sort: Option<SortConfig>,
}

impl FilterContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flight_date(mut self, filter: FlightDateFilter) -> Self {
        self.flight_date = filter;
        self
    }

    /// Set hotel filter ("all" or blank clears it)
    pub fn hotel(mut self, hotel: Option<&str>) -> Self {
        self.hotel = selection(hotel);
        self
    }

    /// Set agency filter ("all" or blank clears it)
    pub fn agency(mut self, agency: Option<&str>) -> Self {
        self.agency = selection(agency);
        self
    }

    pub fn search(mut self, text: Option<&str>) -> Self {
        self.search = text.filter(|t| !t.is_empty()).map(str::to_string);
        self
    }

    pub fn sort(mut self, sort: Option<SortConfig>) -> Self {
        self.sort = sort;
        self
    }

    /// Whether a record passes the hotel, agency and search filters
    ///
    /// The flight date filter is applied separately since the stat cards and
    /// charts only use that one.
    pub fn matches_table(&self, record: &BookingSnapshot) -> bool {
        if let Some(ref hotel) = self.hotel {
            if record.hotel != *hotel {
                return false;
            }
        }

        if let Some(ref agency) = self.agency {
            if record.agency.as_deref() != Some(agency.as_str()) {
                return false;
            }
        }

        match self.search {
            Some(ref text) => matches_search(record, &text.to_lowercase()),
            None => true,
        }
    }
}

fn selection(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != ALL)
        .map(str::to_string)
}

/// Case-insensitive free-text match (`needle_lower` must already be lowercase)
pub fn matches_search(record: &BookingSnapshot, needle_lower: &str) -> bool {
    contains_ci(&record.full_name, needle_lower)
        || contains_ci(&record.passport_number, needle_lower)
        || contains_ci(&record.reservation_code, needle_lower)
        || record
            .agency
            .as_deref()
            .is_some_and(|a| contains_ci(a, needle_lower))
}

/// Restrict records to one flight date ("all" is the identity)
pub fn filter_by_flight_date<'a>(
    records: &'a [ReconciledRecord],
    filter: &FlightDateFilter,
) -> Vec<&'a ReconciledRecord> {
    records.iter().filter(|r| filter.matches(r)).collect()
}
