//! Extraction collaborator abstraction
//!
//! Turning OCR text into booking snapshots is done by an external service.
//! The core only sees it through the `Extractor` trait: one async call that
//! either yields a whole batch or fails. Partial batches are never surfaced.
//!
//! # Architecture
//!
//! - `Extractor` trait: the interface every backend implements
//! - `ExtractorClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backends: `PassthroughExtractor` (pre-extracted JSON), `MockExtractor`
//!
//! # Usage
//!
//! ```rust,ignore
//! let config = RosterConfig::load()?;
//! let extractor = ExtractorClient::from_config(&config.extraction);
//! let state = load_roster(&extractor, &text, config.extraction.max_retries).await;
//! ```

mod mock;
pub mod parsing;
mod passthrough;

pub use mock::MockExtractor;
pub use parsing::{combine_pages, parse_batch, split_pages};
pub use passthrough::PassthroughExtractor;

use async_trait::async_trait;

use crate::config::{ExtractionConfig, ExtractorBackend};
use crate::error::Result;
use crate::models::BookingSnapshot;

/// Sample batch bundled for the mock backend
pub const SAMPLE_BATCH: &str = include_str!("../../fixtures/sample_batch.json");

/// Trait defining the interface for extraction backends
///
/// Backends should be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract booking snapshots from raw OCR text
    async fn extract(&self, text: &str) -> Result<Vec<BookingSnapshot>>;

    /// Check if the backend is available
    async fn health_check(&self) -> bool;

    /// Backend name (for logging)
    fn name(&self) -> &str;
}

/// Concrete extractor enum
#[derive(Clone)]
pub enum ExtractorClient {
    Passthrough(PassthroughExtractor),
    /// Mock backend for testing and demos
    Mock(MockExtractor),
}

impl ExtractorClient {
    pub fn from_config(config: &ExtractionConfig) -> Self {
        match config.backend {
            ExtractorBackend::Passthrough => Self::Passthrough(PassthroughExtractor::new()),
            ExtractorBackend::Mock => Self::Mock(MockExtractor::new()),
        }
    }

    pub fn mock() -> Self {
        Self::Mock(MockExtractor::new())
    }
}

#[async_trait]
impl Extractor for ExtractorClient {
    async fn extract(&self, text: &str) -> Result<Vec<BookingSnapshot>> {
        match self {
            Self::Passthrough(backend) => backend.extract(text).await,
            Self::Mock(backend) => backend.extract(text).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            Self::Passthrough(backend) => backend.health_check().await,
            Self::Mock(backend) => backend.health_check().await,
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Passthrough(backend) => backend.name(),
            Self::Mock(backend) => backend.name(),
        }
    }
}
