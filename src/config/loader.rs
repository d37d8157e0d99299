//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{StoreKind, WardlensConfig};
use super::secret_string;
use crate::domain::errors::WardlensError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into WardlensConfig
/// 4. Applies environment variable overrides (WARDLENS_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`WardlensError::Configuration`] if the file cannot be read or
/// parsed, a referenced variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use wardlens::config::loader::load_config;
///
/// let config = load_config("wardlens.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<WardlensConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(WardlensError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        WardlensError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: WardlensConfig = toml::from_str(&contents)
        .map_err(|e| WardlensError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        WardlensError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| WardlensError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{}}}", var_name), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(WardlensError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using WARDLENS_* prefix
///
/// Environment variables follow the pattern: WARDLENS_<SECTION>_<KEY>
/// For example: WARDLENS_STORE_BASE_URL, WARDLENS_ACCESS_DEPARTMENT
fn apply_env_overrides(config: &mut WardlensConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("WARDLENS_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Historical overrides
    if let Ok(val) = std::env::var("WARDLENS_HISTORICAL_SOURCE") {
        config.historical.source = val;
    }
    if let Ok(val) = std::env::var("WARDLENS_HISTORICAL_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.historical.timeout_seconds = timeout;
        }
    }

    // Store overrides
    if let Ok(val) = std::env::var("WARDLENS_STORE_KIND") {
        config.store.kind = match val.to_lowercase().as_str() {
            "memory" => StoreKind::Memory,
            "rest" => StoreKind::Rest,
            other => {
                return Err(WardlensError::Configuration(format!(
                    "Invalid WARDLENS_STORE_KIND '{}'. Must be one of: memory, rest",
                    other
                )))
            }
        };
    }
    if let Ok(val) = std::env::var("WARDLENS_STORE_BASE_URL") {
        config.store.base_url = Some(val);
    }
    if let Ok(val) = std::env::var("WARDLENS_STORE_TABLE") {
        config.store.table = val;
    }
    if let Ok(val) = std::env::var("WARDLENS_STORE_API_KEY") {
        config.store.api_key = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("WARDLENS_STORE_POLL_INTERVAL_MS") {
        if let Ok(interval) = val.parse() {
            config.store.poll_interval_ms = interval;
        }
    }
    if let Ok(val) = std::env::var("WARDLENS_STORE_ECHO_INSERTS") {
        config.store.echo_inserts = val.parse().unwrap_or(true);
    }

    // Access overrides
    if let Ok(val) = std::env::var("WARDLENS_ACCESS_UNRESTRICTED") {
        config.access.unrestricted = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("WARDLENS_ACCESS_DEPARTMENT") {
        config.access.department = Some(val);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("WARDLENS_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("WARDLENS_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("WARDLENS_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
