//! Domain error types
//!
//! This module defines the error hierarchy for Wardlens. Adapter failures are
//! mapped into domain-specific variants so that third-party types (reqwest,
//! tokio channels) never leak through the public API.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Main Wardlens error type
///
/// This is the primary error type used throughout the library.
#[derive(Debug, Error)]
pub enum WardlensError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Historical dataset source errors
    #[error("Historical source error: {0}")]
    Source(#[from] SourceError),

    /// Live admission store errors
    #[error("Admission store error: {0}")]
    Store(#[from] StoreError),

    /// Admission submission failed field validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationFailure),

    /// Live feed errors (cache task gone, subscription lost)
    #[error("Live feed error: {0}")]
    Feed(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Historical dataset source errors
#[derive(Debug, Error)]
pub enum SourceError {
    /// Local dataset file does not exist
    #[error("Dataset not found: {0}")]
    NotFound(String),

    /// Dataset could not be read
    #[error("Failed to read dataset: {0}")]
    ReadFailed(String),

    /// Could not reach the remote dataset host
    #[error("Failed to connect to dataset host: {0}")]
    ConnectionFailed(String),

    /// Remote host answered with a non-success status
    #[error("Dataset request failed: {status} - {message}")]
    HttpStatus { status: u16, message: String },

    /// Request timed out
    #[error("Dataset request timeout: {0}")]
    Timeout(String),
}

/// Live admission store errors
///
/// A rejected insert surfaces as [`StoreError::Rejected`]; callers must not
/// apply any local effect in that case.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to connect to the store
    #[error("Failed to connect to admission store: {0}")]
    ConnectionFailed(String),

    /// The store refused the write
    #[error("Insert rejected: {status} - {message}")]
    Rejected { status: u16, message: String },

    /// Full-collection read failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// The store answered with something we could not decode
    #[error("Invalid response from store: {0}")]
    InvalidResponse(String),

    /// Feed subscription could not be established
    #[error("Subscription failed: {0}")]
    SubscriptionFailed(String),

    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

/// Fields of a live admission submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionField {
    PatientName,
    Department,
    Severity,
    DoctorName,
    CaseType,
}

impl AdmissionField {
    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PatientName => "patient_name",
            Self::Department => "department",
            Self::Severity => "severity",
            Self::DoctorName => "doctor_name",
            Self::CaseType => "case_type",
        }
    }
}

impl fmt::Display for AdmissionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single violated field constraint
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldViolation {
    /// Field is empty after trimming
    #[error("{field} is required")]
    Missing { field: AdmissionField },

    /// Field is longer than allowed
    #[error("{field} exceeds {max} characters")]
    TooLong { field: AdmissionField, max: usize },

    /// Field is not a member of its enumerated domain
    #[error("{field} '{value}' is not one of: {allowed}")]
    NotAllowed {
        field: AdmissionField,
        value: String,
        allowed: String,
    },

    /// Numeric field with a fractional or non-finite value
    #[error("{field} {value} is not a whole number")]
    NotWholeNumber { field: AdmissionField, value: String },

    /// Numeric field outside its bounds
    #[error("{field} {value} is outside {min}..={max}")]
    OutOfRange {
        field: AdmissionField,
        value: i64,
        min: i64,
        max: i64,
    },
}

impl FieldViolation {
    /// The field this violation refers to
    pub fn field(&self) -> AdmissionField {
        match self {
            Self::Missing { field }
            | Self::TooLong { field, .. }
            | Self::NotAllowed { field, .. }
            | Self::NotWholeNumber { field, .. }
            | Self::OutOfRange { field, .. } => *field,
        }
    }
}

/// Every constraint a submission violated
///
/// Never empty: the validator only builds one when at least one field failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    pub violations: Vec<FieldViolation>,
}

impl ValidationFailure {
    /// Creates a failure from the collected violations
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// Returns true if the given field is among the violations
    pub fn has_field(&self, field: AdmissionField) -> bool {
        self.violations.iter().any(|v| v.field() == field)
    }

    /// Fields that failed, in validation order
    pub fn fields(&self) -> Vec<AdmissionField> {
        self.violations.iter().map(FieldViolation::field).collect()
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.violations.iter().map(|v| v.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationFailure {}

// Conversion from std::io::Error
impl From<std::io::Error> for WardlensError {
    fn from(err: std::io::Error) -> Self {
        WardlensError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for WardlensError {
    fn from(err: serde_json::Error) -> Self {
        WardlensError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for WardlensError {
    fn from(err: toml::de::Error) -> Self {
        WardlensError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wardlens_error_display() {
        let err = WardlensError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_store_error_conversion() {
        let store_err = StoreError::Rejected {
            status: 409,
            message: "duplicate key".to_string(),
        };
        let err: WardlensError = store_err.into();
        assert!(matches!(err, WardlensError::Store(_)));
        assert!(err.to_string().contains("409"));
    }

    #[test]
    fn test_source_error_conversion() {
        let err: WardlensError = SourceError::NotFound("data.csv".to_string()).into();
        assert!(matches!(err, WardlensError::Source(_)));
    }

    #[test]
    fn test_validation_failure_lists_every_field() {
        let failure = ValidationFailure::new(vec![
            FieldViolation::Missing {
                field: AdmissionField::PatientName,
            },
            FieldViolation::OutOfRange {
                field: AdmissionField::Severity,
                value: 7,
                min: 1,
                max: 3,
            },
        ]);

        assert!(failure.has_field(AdmissionField::PatientName));
        assert!(failure.has_field(AdmissionField::Severity));
        assert!(!failure.has_field(AdmissionField::CaseType));
        assert_eq!(
            failure.to_string(),
            "patient_name is required; severity 7 is outside 1..=3"
        );

        let err: WardlensError = failure.into();
        assert!(matches!(err, WardlensError::Validation(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: WardlensError = io_err.into();
        assert!(matches!(err, WardlensError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: WardlensError = json_err.into();
        assert!(matches!(err, WardlensError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: WardlensError = toml_err.into();
        assert!(matches!(err, WardlensError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }
}
