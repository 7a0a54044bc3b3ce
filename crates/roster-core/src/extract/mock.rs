//! Mock extractor for testing
//!
//! Returns a canned batch (or a canned failure) no matter what text it is
//! given. Useful for unit tests and demos without an extraction service.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::models::BookingSnapshot;

use super::parsing::parse_batch;
use super::{Extractor, SAMPLE_BATCH};

#[derive(Clone)]
enum MockResponse {
    /// Raw response text, parsed on every call
    Raw(String),
    Batch(Vec<BookingSnapshot>),
    Fail(String),
}

/// Mock extraction backend
#[derive(Clone)]
pub struct MockExtractor {
    response: MockResponse,
    /// Number of calls that fail before the response is returned
    failures_before_success: u32,
    calls: Arc<AtomicU32>,
    /// Whether health_check should return true
    pub healthy: bool,
}

impl Default for MockExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl MockExtractor {
    /// Mock that returns the bundled sample batch
    pub fn new() -> Self {
        Self::from_response(MockResponse::Raw(SAMPLE_BATCH.to_string()))
    }

    /// Mock that returns `snapshots`
    pub fn with_batch(snapshots: Vec<BookingSnapshot>) -> Self {
        Self::from_response(MockResponse::Batch(snapshots))
    }

    /// Mock that returns a raw model response, as a real service would
    pub fn with_response(raw: &str) -> Self {
        Self::from_response(MockResponse::Raw(raw.to_string()))
    }

    /// Mock whose every call fails
    pub fn failing(message: &str) -> Self {
        let mut mock = Self::from_response(MockResponse::Fail(message.to_string()));
        mock.healthy = false;
        mock
    }

    /// Fail the first `n` calls, then respond normally
    pub fn fail_first(mut self, n: u32) -> Self {
        self.failures_before_success = n;
        self
    }

    /// How many times `extract` has been called
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn from_response(response: MockResponse) -> Self {
        Self {
            response,
            failures_before_success: 0,
            calls: Arc::new(AtomicU32::new(0)),
            healthy: true,
        }
    }
}

#[async_trait]
impl Extractor for MockExtractor {
    async fn extract(&self, _text: &str) -> Result<Vec<BookingSnapshot>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures_before_success {
            return Err(Error::Extraction("Mock extractor is busy".into()));
        }

        match &self.response {
            MockResponse::Raw(raw) => parse_batch(raw),
            MockResponse::Batch(snapshots) => Ok(snapshots.clone()),
            MockResponse::Fail(message) => Err(Error::Extraction(message.clone())),
        }
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn name(&self) -> &str {
        "mock"
    }
}
