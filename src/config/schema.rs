//! Configuration schema types
//!
//! This module defines the configuration structure for Wardlens.

use crate::config::SecretString;
use crate::core::scope::AccessScope;
use serde::{Deserialize, Serialize};

/// Admission store backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// In-process store, lost on exit
    #[default]
    Memory,
    /// PostgREST-style HTTP table
    Rest,
}

/// Main Wardlens configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WardlensConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Historical dataset location
    pub historical: HistoricalConfig,

    /// Live admission store
    #[serde(default)]
    pub store: StoreConfig,

    /// Visibility granted to this caller
    #[serde(default)]
    pub access: AccessScope,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl WardlensConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.historical.validate()?;
        self.store.validate()?;
        validate_access(&self.access)?;
        self.logging.validate()?;
        Ok(())
    }
}

fn validate_access(access: &AccessScope) -> Result<(), String> {
    if let Some(department) = &access.department {
        if department.trim().is_empty() {
            return Err("access.department cannot be empty when set".to_string());
        }
    }
    Ok(())
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Historical dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalConfig {
    /// Local file path, or an `http(s)://` URL
    pub source: String,

    /// Timeout in seconds for remote sources
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl HistoricalConfig {
    /// Whether the source is fetched over HTTP
    pub fn is_remote(&self) -> bool {
        self.source.starts_with("http://") || self.source.starts_with("https://")
    }

    fn validate(&self) -> Result<(), String> {
        if self.source.trim().is_empty() {
            return Err("historical.source cannot be empty".to_string());
        }
        if self.is_remote() {
            url::Url::parse(&self.source)
                .map_err(|e| format!("historical.source is not a valid URL: {e}"))?;
        }
        if self.timeout_seconds == 0 {
            return Err("historical.timeout_seconds must be > 0".to_string());
        }
        Ok(())
    }
}

/// Live admission store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend (memory or rest)
    #[serde(default)]
    pub kind: StoreKind,

    /// Base URL of the REST service (required for `rest`)
    #[serde(default)]
    pub base_url: Option<String>,

    /// Table holding admissions
    #[serde(default = "default_table")]
    pub table: String,

    /// API key, sent as `apikey` and bearer token
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Feed poll interval in milliseconds (rest only)
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Request timeout in seconds (rest only)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Whether confirmed inserts come back through the feed
    #[serde(default = "default_true")]
    pub echo_inserts: bool,
}

impl StoreConfig {
    fn validate(&self) -> Result<(), String> {
        if self.kind == StoreKind::Rest {
            let base_url = self
                .base_url
                .as_deref()
                .filter(|u| !u.trim().is_empty())
                .ok_or_else(|| "store.base_url is required when store.kind = 'rest'".to_string())?;

            let parsed = url::Url::parse(base_url)
                .map_err(|e| format!("store.base_url is not a valid URL: {e}"))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err("store.base_url must start with http:// or https://".to_string());
            }

            if self.table.trim().is_empty() {
                return Err("store.table cannot be empty".to_string());
            }
            if self.poll_interval_ms == 0 {
                return Err("store.poll_interval_ms must be > 0".to_string());
            }
            if self.timeout_seconds == 0 {
                return Err("store.timeout_seconds must be > 0".to_string());
            }
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            kind: StoreKind::default(),
            base_url: None,
            table: default_table(),
            api_key: None,
            poll_interval_ms: default_poll_interval_ms(),
            timeout_seconds: default_timeout_seconds(),
            echo_inserts: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when file logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_table() -> String {
    "patient_admissions".to_string()
}

fn default_poll_interval_ms() -> u64 {
    2000
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
