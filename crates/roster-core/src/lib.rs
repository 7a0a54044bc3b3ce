//! Roster Core Library
//!
//! Shared functionality for the roster booking dashboard:
//! - Booking snapshot model and the extraction wire format
//! - Reconciliation of per-email snapshots into current bookings
//! - Aggregations for dashboard cards and charts
//! - Guest list filtering, sorting and grouping
//! - Split-stay detection and export rows
//! - Pluggable extraction backends behind an async trait

pub mod anomalies;
mod collate;
pub mod config;
pub mod dashboard;
pub mod dates;
pub mod error;
pub mod export;
pub mod extract;
pub mod filter;
pub mod guest_list;
pub mod models;
pub mod reconcile;
pub mod reports;
pub mod session;

/// Test utilities including snapshot builders
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use anomalies::{SplitStay, SplitStayIndex};
pub use collate::locale_cmp;
pub use config::{DashboardConfig, ExtractionConfig, ExtractorBackend, RosterConfig};
pub use dashboard::DashboardView;
pub use error::{Error, Result};
pub use export::{export_rows, ExportRow, ExportSummary, GuestExport};
pub use extract::{
    combine_pages, parse_batch, Extractor, ExtractorClient, MockExtractor, PassthroughExtractor,
};
pub use filter::{FilterContext, FlightDateFilter, SortConfig, SortDirection, SortKey};
pub use guest_list::{build_guest_list, GroupBy, GuestSection};
pub use models::{BookingSnapshot, BookingStatus, ReconciledRecord};
pub use reconcile::{reconcile, reconcile_with_summary, ReconcileSummary};
pub use reports::{DashboardStats, GroupCount};
pub use session::{
    batch_fingerprint, load_roster, LoadState, Roster, RosterSession, EXTRACTION_FAILED_MESSAGE,
};
