//! Domain models and types for Wardlens.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Source records** ([`HistoricalRecord`], [`LiveAdmission`])
//! - **The merged analytical shape** ([`MergedRecord`])
//! - **Enumerated codes** ([`Department`], [`CaseType`], [`Severity`])
//! - **Identifiers** ([`AdmissionId`], [`MonthKey`])
//! - **Error types** ([`WardlensError`], [`StoreError`], [`SourceError`], [`ValidationFailure`])
//! - **Loading state** ([`Loadable`])
//!
//! # Type Safety
//!
//! Enumerated fields are closed types, so a live admission can only ever
//! carry one of the ten intake departments and a severity in 1..=3:
//!
//! ```rust
//! use wardlens::domain::{Department, Severity};
//!
//! assert!("Cardiology".parse::<Department>().is_ok());
//! assert!("Dermatology".parse::<Department>().is_err());
//! assert!(Severity::new(4).is_none());
//! ```

pub mod codes;
pub mod errors;
pub mod ids;
pub mod loadable;
pub mod records;
pub mod result;

// Re-export commonly used types for convenience
pub use codes::{CaseType, Department, Severity};
pub use errors::{
    AdmissionField, FieldViolation, SourceError, StoreError, ValidationFailure, WardlensError,
};
pub use ids::{AdmissionId, MonthKey};
pub use loadable::Loadable;
pub use records::{
    AdmissionPayload, HistoricalRecord, LiveAdmission, MergedRecord, NormalizedAdmission,
    RecordOrigin,
};
pub use result::Result;
