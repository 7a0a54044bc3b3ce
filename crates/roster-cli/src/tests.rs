//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::path::{Path, PathBuf};

use roster_core::{ExtractorBackend, FlightDateFilter, RosterConfig, SortDirection, SortKey};
use tempfile::TempDir;

use crate::cli::FilterArgs;
use crate::commands::{self, truncate};

/// Write the bundled sample batch into a temp dir, returning (dir, path)
fn sample_batch_file() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("batch.json");
    std::fs::write(&path, roster_core::extract::SAMPLE_BATCH).unwrap();
    (dir, path)
}

fn no_filters() -> FilterArgs {
    FilterArgs {
        flight_date: "all".to_string(),
        hotel: None,
        agency: None,
        search: None,
        sort: None,
        desc: false,
    }
}

fn config() -> RosterConfig {
    RosterConfig::default()
}

// ========== Utility Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a long string that exceeds", 10), "a long ..."); // 7 chars + "..."
    assert_eq!(truncate("exact", 5), "exact");
    assert_eq!(truncate("toolong", 6), "too...");
}

#[test]
fn test_truncate_multibyte() {
    assert_eq!(truncate("MUÑOZ GARCÍA JOSÉ", 8), "MUÑOZ...");
}

#[test]
fn test_build_filters_defaults() {
    let filters = commands::build_filters(&no_filters()).unwrap();
    assert_eq!(filters.flight_date, FlightDateFilter::All);
    assert!(filters.hotel.is_none());
    assert!(filters.sort.is_none());
}

#[test]
fn test_build_filters_all_flags() {
    let args = FilterArgs {
        flight_date: "05.01.25".to_string(),
        hotel: Some("Venetur Margarita".to_string()),
        agency: Some("all".to_string()),
        search: Some("olga".to_string()),
        sort: Some("nombre".to_string()),
        desc: true,
    };

    let filters = commands::build_filters(&args).unwrap();
    assert_eq!(filters.flight_date, FlightDateFilter::Date("05.01.25".into()));
    assert_eq!(filters.hotel.as_deref(), Some("Venetur Margarita"));
    assert!(filters.agency.is_none());
    assert_eq!(filters.search.as_deref(), Some("olga"));

    let sort = filters.sort.unwrap();
    assert_eq!(sort.key, SortKey::FullName);
    assert_eq!(sort.direction, SortDirection::Desc);
}

#[test]
fn test_build_filters_unknown_sort_key() {
    let args = FilterArgs {
        sort: Some("shoe_size".to_string()),
        ..no_filters()
    };
    assert!(commands::build_filters(&args).is_err());
}

// ========== Load Tests ==========

#[tokio::test]
async fn test_load_batch() {
    let (_dir, path) = sample_batch_file();
    let roster = commands::load_batch(&path, &config()).await.unwrap();
    assert_eq!(roster.len(), 4);
}

#[tokio::test]
async fn test_load_batch_missing_file() {
    let result = commands::load_batch(Path::new("/nonexistent/batch.json"), &config()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_load_batch_not_an_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("batch.json");
    std::fs::write(&path, r#"{"error": "quota exceeded"}"#).unwrap();

    let err = commands::load_batch(&path, &config()).await.unwrap_err();
    assert_eq!(err.to_string(), roster_core::EXTRACTION_FAILED_MESSAGE);
}

#[tokio::test]
async fn test_load_batch_mock_backend_ignores_file_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scan.txt");
    std::fs::write(&path, "Page 1:\nOCR text that is not JSON").unwrap();

    let mut config = config();
    config.extraction.backend = ExtractorBackend::Mock;

    let roster = commands::load_batch(&path, &config).await.unwrap();
    assert_eq!(roster.len(), 4);
}

// ========== Command Tests ==========

#[tokio::test]
async fn test_cmd_reconcile() {
    let (_dir, path) = sample_batch_file();
    assert!(commands::cmd_reconcile(&path, &config(), false).await.is_ok());
    assert!(commands::cmd_reconcile(&path, &config(), true).await.is_ok());
}

#[tokio::test]
async fn test_cmd_dashboard() {
    let (_dir, path) = sample_batch_file();
    assert!(commands::cmd_dashboard(&path, &config(), "all", false)
        .await
        .is_ok());
    assert!(commands::cmd_dashboard(&path, &config(), "12.01.25", true)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_cmd_dashboard_unknown_date() {
    let (_dir, path) = sample_batch_file();
    let result = commands::cmd_dashboard(&path, &config(), "31.12.99", false).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_cmd_guests() {
    let (_dir, path) = sample_batch_file();
    assert!(commands::cmd_guests(&path, &config(), &no_filters(), false)
        .await
        .is_ok());

    let args = FilterArgs {
        hotel: Some("Hesperia Isla Margarita".to_string()),
        sort: Some("nights".to_string()),
        ..no_filters()
    };
    assert!(commands::cmd_guests(&path, &config(), &args, true)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_cmd_guests_no_matches() {
    let (_dir, path) = sample_batch_file();
    let args = FilterArgs {
        search: Some("nobody by this name".to_string()),
        ..no_filters()
    };
    assert!(commands::cmd_guests(&path, &config(), &args, false)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_cmd_dates_and_anomalies() {
    let (_dir, path) = sample_batch_file();
    assert!(commands::cmd_dates(&path, &config()).await.is_ok());
    assert!(commands::cmd_anomalies(&path, &config(), false).await.is_ok());
    assert!(commands::cmd_anomalies(&path, &config(), true).await.is_ok());
}

#[tokio::test]
async fn test_cmd_export() {
    let (dir, path) = sample_batch_file();
    let output = dir.path().join("export.json");

    commands::cmd_export(&path, &config(), &output, &no_filters())
        .await
        .unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    let rows = written["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0]["number"], 1);
    assert_eq!(written["summary"]["total_records"], 4);
    assert_eq!(written["summary"]["highlighted_records"], 2);
}

#[tokio::test]
async fn test_cmd_export_refuses_to_overwrite() {
    let (dir, path) = sample_batch_file();
    let output = dir.path().join("export.json");
    std::fs::write(&output, "keep me").unwrap();

    let result = commands::cmd_export(&path, &config(), &output, &no_filters()).await;
    assert!(result.is_err());
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "keep me");
}
