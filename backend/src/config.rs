//! Analysis configuration file support.
//!
//! Thresholds used by interval construction and the metrics engine. Values
//! come from `analysis.toml` when present; every field has a default so an
//! absent or partial file still yields a working configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::MetersPerSecond;

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// Thresholds for interval construction and KPI derivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Wind speed below which the turbine cannot produce (m/s).
    #[serde(default = "default_cut_in_speed")]
    pub cut_in_speed: MetersPerSecond,
    /// Wind speed above which the turbine shuts down for safety (m/s).
    #[serde(default = "default_cut_out_speed")]
    pub cut_out_speed: MetersPerSecond,
    /// Longest plausible ON→OFF event pairing. Pairings beyond this are
    /// assumed to have lost their OFF record and are discarded.
    #[serde(default = "default_max_event_interval")]
    pub max_event_interval: qtty::Hours,
    /// Event intervals separated by at most this gap are merged into a
    /// single span, so brief reconnections do not count as new outages.
    #[serde(default = "default_gap_merge_tolerance")]
    pub gap_merge_tolerance: qtty::Hours,
    /// How soon after an operating interval a repair interval must start
    /// to count as one distinct failure.
    #[serde(default = "default_failure_adjacency")]
    pub failure_adjacency: qtty::Seconds,
    /// Keyword marking an event type as a technical fault.
    #[serde(default = "default_fault_event_keyword")]
    pub fault_event_keyword: String,
    /// Keyword marking an event type as planned maintenance.
    #[serde(default = "default_maintenance_event_keyword")]
    pub maintenance_event_keyword: String,
}

fn default_cut_in_speed() -> MetersPerSecond {
    MetersPerSecond::new(3.0)
}

fn default_cut_out_speed() -> MetersPerSecond {
    MetersPerSecond::new(25.0)
}

fn default_max_event_interval() -> qtty::Hours {
    qtty::Hours::new(48.0)
}

fn default_gap_merge_tolerance() -> qtty::Hours {
    qtty::Hours::new(1.0)
}

fn default_failure_adjacency() -> qtty::Seconds {
    qtty::Seconds::new(600.0)
}

fn default_fault_event_keyword() -> String {
    "fault".to_string()
}

fn default_maintenance_event_keyword() -> String {
    "maintenance".to_string()
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            cut_in_speed: default_cut_in_speed(),
            cut_out_speed: default_cut_out_speed(),
            max_event_interval: default_max_event_interval(),
            gap_merge_tolerance: default_gap_merge_tolerance(),
            failure_adjacency: default_failure_adjacency(),
            fault_event_keyword: default_fault_event_keyword(),
            maintenance_event_keyword: default_maintenance_event_keyword(),
        }
    }
}

impl AnalysisConfig {
    /// Load analysis configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::ConfigurationError(format!("Failed to read config file: {}", e))
        })?;

        let config: AnalysisConfig = toml::from_str(&content).map_err(|e| {
            ConfigError::ConfigurationError(format!("Failed to parse config file: {}", e))
        })?;

        Ok(config)
    }

    /// Load analysis configuration from the default location.
    ///
    /// Searches for `analysis.toml` in the current directory, `backend/`
    /// and the parent directory. Falls back to defaults when no file
    /// exists.
    pub fn from_default_location() -> Self {
        let search_paths = [
            PathBuf::from("analysis.toml"),
            PathBuf::from("backend/analysis.toml"),
            PathBuf::from("../analysis.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return config,
                    Err(e) => {
                        log::warn!("Ignoring unreadable {}: {}", path.display(), e);
                    }
                }
            }
        }

        Self::default()
    }

    /// Gap-merge tolerance in seconds.
    pub fn gap_merge_tolerance_seconds(&self) -> f64 {
        self.gap_merge_tolerance.value() * 3_600.0
    }

    /// Max plausible event-interval length in seconds.
    pub fn max_event_interval_seconds(&self) -> f64 {
        self.max_event_interval.value() * 3_600.0
    }
}
