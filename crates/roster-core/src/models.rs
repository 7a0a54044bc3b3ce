//! Domain models for Roster
//!
//! Field names on the wire follow the extraction service's JSON schema
//! (`fechaVuelo`, `codigoReserva`, ...). Text fields that are absent or `null`
//! deserialize to an empty string so that grouping and sorting never fault.

use std::ops::Deref;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::dates;

/// Booking status as reported by one email
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BookingStatus {
    #[default]
    NewBooking,
    Amend,
    Cancellation,
    /// Anything the extractor produced that we don't recognize
    Other(String),
}

impl BookingStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::NewBooking => "NEW BOOKING",
            Self::Amend => "AMEND",
            Self::Cancellation => "CANCELLATION",
            Self::Other(s) => s,
        }
    }

    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancellation)
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();

        Ok(match normalized.as_str() {
            "NEW_BOOKING" => Self::NewBooking,
            "AMEND" => Self::Amend,
            "CANCELLATION" => Self::Cancellation,
            _ => Self::Other(s.to_string()),
        })
    }
}

impl From<String> for BookingStatus {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

impl From<BookingStatus> for String {
    fn from(status: BookingStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One passenger's state as of one booking email
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BookingSnapshot {
    #[serde(rename = "fechaVuelo", default, deserialize_with = "null_as_empty")]
    pub flight_date: String,
    /// When the email carrying this snapshot was sent (ISO 8601)
    #[serde(rename = "fechaHoraCorreo", default, deserialize_with = "null_as_empty")]
    pub email_timestamp: String,
    #[serde(rename = "estatus", default, deserialize_with = "null_as_empty")]
    pub status: BookingStatus,
    /// Shared by every passenger (and every email) of one reservation
    #[serde(rename = "codigoReserva", default, deserialize_with = "null_as_empty")]
    pub reservation_code: String,
    #[serde(rename = "genero", default, deserialize_with = "null_as_empty")]
    pub gender: String,
    #[serde(rename = "nombreCompleto", default, deserialize_with = "null_as_empty")]
    pub full_name: String,
    #[serde(rename = "fechaNacimiento", default, deserialize_with = "null_as_empty")]
    pub birth_date: String,
    #[serde(rename = "edad", default)]
    pub age: Option<u32>,
    #[serde(rename = "pasaporte", default, deserialize_with = "null_as_empty")]
    pub passport_number: String,
    #[serde(rename = "nacionalidad", default, deserialize_with = "null_as_empty")]
    pub nationality: String,
    #[serde(rename = "agencia", default, deserialize_with = "blank_as_none")]
    pub agency: Option<String>,
    #[serde(rename = "fechaInicio", default, deserialize_with = "null_as_empty")]
    pub check_in: String,
    #[serde(rename = "fechaFin", default, deserialize_with = "null_as_empty")]
    pub check_out: String,
    #[serde(rename = "noches", default)]
    pub nights: Option<u32>,
    #[serde(rename = "hotel", default, deserialize_with = "null_as_empty")]
    pub hotel: String,
    #[serde(rename = "planDeComidas", default, deserialize_with = "null_as_empty")]
    pub meal_plan: String,
    #[serde(rename = "alojamiento", default, deserialize_with = "null_as_empty")]
    pub room_type: String,
    #[serde(rename = "observaciones", default, deserialize_with = "null_as_empty")]
    pub remarks: String,
}

impl BookingSnapshot {
    /// Identity of a passenger within a reservation
    pub fn passenger_key(&self) -> (&str, &str) {
        (&self.reservation_code, &self.passport_number)
    }

    pub fn agency_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.agency.as_deref().unwrap_or(fallback)
    }

    pub fn hotel_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.hotel.is_empty() {
            fallback
        } else {
            &self.hotel
        }
    }

    /// Parsed email timestamp, if it is a recognizable date/time
    pub fn email_instant(&self) -> Option<NaiveDateTime> {
        dates::parse_timestamp(&self.email_timestamp)
    }
}

/// A snapshot that survived reconciliation
///
/// Only the reconciliation engine constructs these. Each one belongs to the
/// latest, non-cancelled state of its reservation code.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ReconciledRecord(BookingSnapshot);

impl ReconciledRecord {
    pub(crate) fn new(snapshot: BookingSnapshot) -> Self {
        Self(snapshot)
    }

    pub fn snapshot(&self) -> &BookingSnapshot {
        &self.0
    }
}

impl Deref for ReconciledRecord {
    type Target = BookingSnapshot;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn blank_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing_is_lenient() {
        assert_eq!(
            "NEW BOOKING".parse::<BookingStatus>().unwrap(),
            BookingStatus::NewBooking
        );
        assert_eq!(
            "new_booking".parse::<BookingStatus>().unwrap(),
            BookingStatus::NewBooking
        );
        assert_eq!(
            "Cancellation".parse::<BookingStatus>().unwrap(),
            BookingStatus::Cancellation
        );
        assert_eq!("amend".parse::<BookingStatus>().unwrap(), BookingStatus::Amend);
        assert_eq!(
            "ON HOLD".parse::<BookingStatus>().unwrap(),
            BookingStatus::Other("ON HOLD".to_string())
        );
    }

    #[test]
    fn test_status_only_exact_cancellation_cancels() {
        for raw in ["CANCELLED", "Canceled", " CANCELLATION "] {
            let status: BookingStatus = raw.parse().unwrap();
            assert!(!status.is_cancellation(), "{raw:?} parsed as a cancellation");
            assert_eq!(status, BookingStatus::Other(raw.to_string()));
        }
        assert!("cAnCeLlAtIoN"
            .parse::<BookingStatus>()
            .unwrap()
            .is_cancellation());
    }

    #[test]
    fn test_snapshot_null_status_defaults() {
        let snapshot: BookingSnapshot =
            serde_json::from_str(r#"{"codigoReserva": "R1", "estatus": null}"#).unwrap();
        assert_eq!(snapshot.status, BookingStatus::NewBooking);
    }

    #[test]
    fn test_snapshot_from_wire_json() {
        let json = r#"{
            "fechaVuelo": "05.01.25",
            "fechaHoraCorreo": "2025-01-02 10:00:00",
            "estatus": "AMEND",
            "codigoReserva": "R1",
            "genero": "Mr.",
            "nombreCompleto": "JUAN PEREZ",
            "fechaNacimiento": "1980-03-04",
            "edad": 44,
            "pasaporte": "P123",
            "nacionalidad": "RUS",
            "agencia": "",
            "fechaInicio": "2025-01-05",
            "fechaFin": "2025-01-12",
            "noches": 7,
            "hotel": "Venetur Margarita",
            "planDeComidas": "AI",
            "alojamiento": "DBL"
        }"#;

        let snapshot: BookingSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.status, BookingStatus::Amend);
        assert_eq!(snapshot.reservation_code, "R1");
        assert_eq!(snapshot.agency, None);
        assert_eq!(snapshot.remarks, "");
        assert_eq!(snapshot.nights, Some(7));
        assert_eq!(snapshot.passenger_key(), ("R1", "P123"));
    }

    #[test]
    fn test_snapshot_null_fields_default() {
        let json = r#"{"codigoReserva": null, "hotel": null, "observaciones": null, "estatus": "NEW BOOKING"}"#;
        let snapshot: BookingSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.reservation_code, "");
        assert_eq!(snapshot.hotel_or("Unknown"), "Unknown");
        assert_eq!(snapshot.remarks, "");
        assert_eq!(snapshot.agency_or("Sin Agencia"), "Sin Agencia");
    }

    #[test]
    fn test_status_serializes_as_text() {
        let snapshot = BookingSnapshot {
            status: BookingStatus::Cancellation,
            ..Default::default()
        };
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["estatus"], "CANCELLATION");
    }
}
