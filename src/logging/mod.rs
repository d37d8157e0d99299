//! Logging and observability
//!
//! Structured logging through `tracing`, with JSON file output and a small
//! set of macros for the events Wardlens logs repeatedly.
//!
//! # Example
//!
//! ```no_run
//! use wardlens::logging::init_logging;
//! use wardlens::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log a live feed notification applied to the cache
///
/// # Example
///
/// ```no_run
/// use wardlens::log_feed_event;
///
/// log_feed_event!("insert", "0b7c", 42u64);
/// ```
#[macro_export]
macro_rules! log_feed_event {
    ($event:expr, $id:expr, $version:expr) => {
        tracing::debug!(
            event = $event,
            admission_id = %$id,
            version = $version,
            "Applied feed notification"
        );
    };
}

/// Log a completed data load
///
/// # Example
///
/// ```no_run
/// use wardlens::log_load_complete;
/// use std::time::Duration;
///
/// log_load_complete!("historical", 1200, Duration::from_millis(35));
/// ```
#[macro_export]
macro_rules! log_load_complete {
    ($source:expr, $count:expr, $duration:expr) => {
        tracing::info!(
            source = $source,
            count = $count,
            duration_ms = $duration.as_millis() as u64,
            "Load completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use wardlens::log_error_with_context;
/// use wardlens::domain::WardlensError;
///
/// let error = WardlensError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use wardlens::log_retry_attempt;
///
/// log_retry_attempt!(2, 3, "Connection timeout");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = %$reason,
            "Retrying operation"
        );
    };
}
