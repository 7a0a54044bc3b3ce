//! Roster configuration
//!
//! Config is loaded with a two-layer resolution:
//! 1. Explicit path, or the override in the config dir
//!    (~/.config/roster/roster.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Environment variables win over both:
//! - `ROSTER_SOLO_HOTEL`: hotel fragment for the solo travelers card
//! - `EXTRACTOR_BACKEND`: extraction backend (passthrough, mock)

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../config/roster.toml");

/// Which extraction collaborator to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractorBackend {
    #[default]
    Passthrough,
    Mock,
}

impl ExtractorBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passthrough => "passthrough",
            Self::Mock => "mock",
        }
    }
}

impl std::str::FromStr for ExtractorBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "passthrough" | "json" => Ok(Self::Passthrough),
            "mock" => Ok(Self::Mock),
            _ => Err(format!("Unknown extractor backend: {}", s)),
        }
    }
}

impl std::fmt::Display for ExtractorBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub solo_hotel: String,
    pub unknown_label: String,
    pub no_agency_label: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            solo_hotel: "venetur margarita".to_string(),
            unknown_label: "Unknown".to_string(),
            no_agency_label: "Sin Agencia".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionConfig {
    pub backend: ExtractorBackend,
    /// Extra attempts after a failed call
    pub max_retries: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterConfig {
    pub dashboard: DashboardConfig,
    pub extraction: ExtractionConfig,
}

impl RosterConfig {
    /// Load config from the default locations plus environment overrides
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load config from an explicit override path (if any)
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let content = read_config(path)?;
        let mut config = parse_config(&content)?;
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(hotel) = std::env::var("ROSTER_SOLO_HOTEL") {
            if !hotel.trim().is_empty() {
                self.dashboard.solo_hotel = hotel;
            }
        }

        if let Ok(backend) = std::env::var("EXTRACTOR_BACKEND") {
            match backend.parse() {
                Ok(backend) => self.extraction.backend = backend,
                Err(e) => tracing::warn!(error = %e, "Ignoring EXTRACTOR_BACKEND"),
            }
        }
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("roster").join("roster.toml"))
}

fn read_config(override_path: Option<&Path>) -> Result<String> {
    let path = match override_path {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path(),
    };

    match path {
        Some(path) if path.exists() => {
            debug!(path = %path.display(), "Loading config override");
            fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))
        }
        _ => Ok(DEFAULT_CONFIG.to_string()),
    }
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    dashboard: Option<RawDashboard>,
    extraction: Option<RawExtraction>,
}

#[derive(Debug, Deserialize)]
struct RawDashboard {
    solo_hotel: Option<String>,
    unknown_label: Option<String>,
    no_agency_label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawExtraction {
    backend: Option<String>,
    max_retries: Option<u32>,
}

/// Parse config from TOML content, applying it over the defaults
fn parse_config(content: &str) -> Result<RosterConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = RosterConfig::default();

    if let Some(dashboard) = raw.dashboard {
        if let Some(hotel) = dashboard.solo_hotel {
            config.dashboard.solo_hotel = hotel;
        }
        if let Some(label) = dashboard.unknown_label {
            config.dashboard.unknown_label = label;
        }
        if let Some(label) = dashboard.no_agency_label {
            config.dashboard.no_agency_label = label;
        }
    }

    if let Some(extraction) = raw.extraction {
        if let Some(backend) = extraction.backend {
            config.extraction.backend = backend.parse().map_err(Error::Config)?;
        }
        if let Some(retries) = extraction.max_retries {
            config.extraction.max_retries = retries;
        }
    }

    Ok(config)
}
