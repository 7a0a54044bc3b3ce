//! Load pipeline and reconciled roster
//!
//! One batch goes through the extractor as a single unit of work. On success
//! it is reconciled once into an immutable `Roster`; every dashboard view is
//! then recomputed from that roster and the current filters. On failure the
//! caller gets one user-facing message and no partial data.

use sha2::{Digest, Sha256};
use tracing::{debug, error, info, warn};

use crate::anomalies::SplitStayIndex;
use crate::config::RosterConfig;
use crate::dashboard::DashboardView;
use crate::error::Result;
use crate::export::{export_rows, GuestExport};
use crate::extract::Extractor;
use crate::filter::{FilterContext, SortConfig, SortKey};
use crate::guest_list::build_guest_list;
use crate::models::{BookingSnapshot, ReconciledRecord};
use crate::reconcile::{reconcile_with_summary, ReconcileSummary};
use crate::reports;

/// Shown when extraction fails for any reason
pub const EXTRACTION_FAILED_MESSAGE: &str =
    "Could not process the booking data. The extraction service may be busy or an error occurred.";

/// The reconciled set for one batch, plus indexes derived from it
#[derive(Debug, Clone)]
pub struct Roster {
    records: Vec<ReconciledRecord>,
    split_stays: SplitStayIndex,
    summary: ReconcileSummary,
    fingerprint: String,
}

impl Roster {
    pub fn from_snapshots(snapshots: Vec<BookingSnapshot>) -> Self {
        let fingerprint = batch_fingerprint(&snapshots);
        let (records, summary) = reconcile_with_summary(snapshots);
        let split_stays = SplitStayIndex::build(&records);

        if !split_stays.is_empty() {
            info!(
                reservations = split_stays.len(),
                "Reservations span more than one hotel"
            );
        }

        Self {
            records,
            split_stays,
            summary,
            fingerprint,
        }
    }

    /// Full, unfiltered reconciled set
    pub fn records(&self) -> &[ReconciledRecord] {
        &self.records
    }

    pub fn split_stays(&self) -> &SplitStayIndex {
        &self.split_stays
    }

    pub fn summary(&self) -> &ReconcileSummary {
        &self.summary
    }

    /// SHA-256 of the raw batch this roster was built from
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Flight date options, "all" first
    pub fn flight_dates(&self) -> Vec<String> {
        reports::unique_flight_dates(&self.records)
    }

    pub fn dashboard(&self, filters: &FilterContext, config: &RosterConfig) -> DashboardView<'_> {
        DashboardView::build(&self.records, &self.split_stays, filters, &config.dashboard)
    }

    /// Export rows for the guest table under `filters`
    pub fn export(&self, filters: &FilterContext) -> GuestExport {
        let sections = build_guest_list(&self.records, filters);
        export_rows(&sections, &self.split_stays)
    }
}

/// Hash a raw batch so identical reloads can be detected
pub fn batch_fingerprint(snapshots: &[BookingSnapshot]) -> String {
    let mut hasher = Sha256::new();
    for snapshot in snapshots {
        for field in [
            snapshot.flight_date.as_str(),
            snapshot.email_timestamp.as_str(),
            snapshot.status.as_str(),
            snapshot.reservation_code.as_str(),
            snapshot.gender.as_str(),
            snapshot.full_name.as_str(),
            snapshot.birth_date.as_str(),
            snapshot.passport_number.as_str(),
            snapshot.nationality.as_str(),
            snapshot.agency.as_deref().unwrap_or(""),
            snapshot.check_in.as_str(),
            snapshot.check_out.as_str(),
            snapshot.hotel.as_str(),
            snapshot.meal_plan.as_str(),
            snapshot.room_type.as_str(),
            snapshot.remarks.as_str(),
        ] {
            hasher.update(field.as_bytes());
            hasher.update([0u8]);
        }
        hasher.update(snapshot.age.map_or(-1i64, i64::from).to_be_bytes());
        hasher.update(snapshot.nights.map_or(-1i64, i64::from).to_be_bytes());
        hasher.update([0xffu8]);
    }
    hex::encode(hasher.finalize())
}

/// Observable outcome of loading one batch
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    /// Extraction has not completed
    #[default]
    Pending,
    Ready(Roster),
    /// User-facing failure message
    Failed(String),
}

impl LoadState {
    pub fn roster(&self) -> Option<&Roster> {
        match self {
            Self::Ready(roster) => Some(roster),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Run extraction with up to `max_retries` extra attempts
pub async fn extract_batch<E>(
    extractor: &E,
    text: &str,
    max_retries: u32,
) -> Result<Vec<BookingSnapshot>>
where
    E: Extractor + ?Sized,
{
    let mut attempt = 0;
    loop {
        match extractor.extract(text).await {
            Ok(snapshots) => {
                debug!(
                    backend = extractor.name(),
                    attempt,
                    snapshots = snapshots.len(),
                    "Extraction succeeded"
                );
                return Ok(snapshots);
            }
            Err(e) if attempt < max_retries => {
                attempt += 1;
                warn!(
                    backend = extractor.name(),
                    attempt,
                    max_retries,
                    error = %e,
                    "Extraction failed, retrying"
                );
            }
            Err(e) => return Err(e),
        }
    }
}

/// Extract and reconcile one batch
pub async fn load_roster<E>(extractor: &E, text: &str, max_retries: u32) -> LoadState
where
    E: Extractor + ?Sized,
{
    match extract_batch(extractor, text, max_retries).await {
        Ok(snapshots) => LoadState::Ready(Roster::from_snapshots(snapshots)),
        Err(e) => {
            error!(backend = extractor.name(), error = %e, "Extraction failed");
            LoadState::Failed(EXTRACTION_FAILED_MESSAGE.to_string())
        }
    }
}

/// Current batch plus the user's filter selections
#[derive(Debug, Clone, Default)]
pub struct RosterSession {
    state: LoadState,
    filters: FilterContext,
}

impl RosterSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn filters(&self) -> &FilterContext {
        &self.filters
    }

    pub fn set_filters(&mut self, filters: FilterContext) {
        self.filters = filters;
    }

    /// Select a sort column, flipping direction on a repeated ascending pick
    pub fn toggle_sort(&mut self, key: SortKey) -> SortConfig {
        let sort = SortConfig::toggle(self.filters.sort, key);
        self.filters.sort = Some(sort);
        sort
    }

    /// Load a batch into the session
    ///
    /// Returns false when the batch matches the one already loaded, in which
    /// case the existing roster is kept as is.
    pub async fn load<E>(&mut self, extractor: &E, text: &str, max_retries: u32) -> bool
    where
        E: Extractor + ?Sized,
    {
        self.state = match std::mem::take(&mut self.state) {
            LoadState::Ready(roster) => LoadState::Ready(roster),
            _ => LoadState::Pending,
        };

        let snapshots = match extract_batch(extractor, text, max_retries).await {
            Ok(snapshots) => snapshots,
            Err(e) => {
                error!(backend = extractor.name(), error = %e, "Extraction failed");
                self.state = LoadState::Failed(EXTRACTION_FAILED_MESSAGE.to_string());
                return true;
            }
        };

        if let Some(current) = self.state.roster() {
            if current.fingerprint() == batch_fingerprint(&snapshots) {
                debug!("Batch unchanged, keeping reconciled roster");
                return false;
            }
        }

        self.state = LoadState::Ready(Roster::from_snapshots(snapshots));
        true
    }

    /// Dashboard for the current filters, if a roster is loaded
    pub fn dashboard(&self, config: &RosterConfig) -> Option<DashboardView<'_>> {
        self.state
            .roster()
            .map(|roster| roster.dashboard(&self.filters, config))
    }
}
