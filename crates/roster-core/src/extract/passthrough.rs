//! Passthrough extractor
//!
//! For batches that were already run through the extraction service: the
//! input text *is* the service's JSON response. Text combined with
//! `combine_pages` is split back into pages and each page parsed as its own
//! array.

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::models::BookingSnapshot;

use super::parsing::{parse_batch, split_pages};
use super::Extractor;

#[derive(Debug, Clone, Default)]
pub struct PassthroughExtractor;

impl PassthroughExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Extractor for PassthroughExtractor {
    async fn extract(&self, text: &str) -> Result<Vec<BookingSnapshot>> {
        let pages = split_pages(text);
        debug!(pages = pages.len(), "Parsing pre-extracted batch");

        let mut snapshots = Vec::new();
        for page in pages {
            snapshots.extend(parse_batch(page)?);
        }
        Ok(snapshots)
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "passthrough"
    }
}
