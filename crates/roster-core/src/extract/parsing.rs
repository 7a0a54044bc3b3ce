//! JSON parsing helpers for extraction responses
//!
//! Model responses often wrap the JSON payload in extra prose, so the
//! outermost `[`...`]` span is located before parsing. Anything other than
//! an array of booking objects fails the whole batch.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::BookingSnapshot;

static PAGE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^Page \d+:[ \t]*$").expect("valid regex"));

/// Truncate long responses for error messages
fn truncate_raw(raw: &str) -> String {
    if raw.len() > 200 {
        let cut = (0..=200).rev().find(|i| raw.is_char_boundary(*i)).unwrap_or(0);
        format!("{}...", &raw[..cut])
    } else {
        raw.to_string()
    }
}

/// Parse a batch of booking snapshots from an extraction response
pub fn parse_batch(response: &str) -> Result<Vec<BookingSnapshot>> {
    let response = response.trim();

    let start = response.find('[');
    let end = response.rfind(']');

    let json_str = match (start, end) {
        (Some(s), Some(e)) if s < e => &response[s..=e],
        _ => {
            return Err(Error::Extraction(format!(
                "Extraction response is not an array | Raw: {}",
                truncate_raw(response)
            )))
        }
    };

    let value: Value = serde_json::from_str(json_str).map_err(|e| {
        Error::Extraction(format!(
            "Invalid JSON from extractor: {} | Raw: {}",
            e,
            truncate_raw(json_str)
        ))
    })?;

    let Value::Array(items) = value else {
        return Err(Error::Extraction(
            "Extraction response is not an array".into(),
        ));
    };

    let snapshots = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value::<BookingSnapshot>(item).map_err(|e| {
                Error::InvalidData(format!("Malformed booking record at index {}: {}", i, e))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Parsed {} booking snapshots", snapshots.len());
    Ok(snapshots)
}

/// Join OCR pages into one extraction request, numbered from 1
pub fn combine_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .enumerate()
        .map(|(i, page)| format!("Page {}:\n{}", i + 1, page.as_ref()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Split text produced by `combine_pages` back into page bodies
///
/// Text without page headers is returned as a single page.
pub fn split_pages(text: &str) -> Vec<&str> {
    if !PAGE_HEADER.is_match(text) {
        return vec![text];
    }

    PAGE_HEADER
        .split(text)
        .map(str::trim)
        .filter(|page| !page.is_empty())
        .collect()
}
