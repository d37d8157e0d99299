//! Configuration management for Wardlens.
//!
//! TOML configuration with `${VAR_NAME}` substitution, `WARDLENS_*`
//! environment overrides, defaults for optional settings, and validation on
//! load.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use wardlens::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("wardlens.toml")?;
//! println!("Historical source: {}", config.historical.source);
//! println!("Store: {:?}", config.store.kind);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`HistoricalConfig`] - Historical dataset path or URL
//! - [`StoreConfig`] - Live admission store backend
//! - `access` - The caller's [`AccessScope`](crate::core::scope::AccessScope)
//! - [`LoggingConfig`] - File logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [historical]
//! source = "data/hospital_data.csv"
//!
//! [store]
//! kind = "rest"
//! base_url = "https://your-project.example.co"
//! table = "patient_admissions"
//! api_key = "${WARDLENS_STORE_API_KEY}"
//!
//! [access]
//! unrestricted = false
//! department = "Cardiology"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, HistoricalConfig, LoggingConfig, StoreConfig, StoreKind, WardlensConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
