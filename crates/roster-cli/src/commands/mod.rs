//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (load_batch, build_filters, print_json)
//! - `dashboard` - Stat cards, charts and flight dates
//! - `export` - Export rows for spreadsheet/document tools
//! - `guests` - Guest list and split-stay anomalies
//! - `reconcile` - Reconciliation summary

pub mod core;
pub mod dashboard;
pub mod export;
pub mod guests;
pub mod reconcile;

// Re-export command functions for main.rs
pub use core::*;
pub use dashboard::*;
pub use export::*;
pub use guests::*;
pub use reconcile::*;

/// Truncate a string to a maximum length in characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
