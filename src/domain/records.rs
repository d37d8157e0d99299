//! Record types
//!
//! [`HistoricalRecord`] and [`LiveAdmission`] are the two source shapes;
//! [`MergedRecord`] is the single shape every aggregate consumes.

use super::codes::{CaseType, Department, Severity};
use super::ids::{AdmissionId, MonthKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One closed clinical case from the historical dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalRecord {
    pub month: MonthKey,
    pub case_no: String,
    pub dob: f64,
    pub nationality: String,
    pub gender: String,
    pub doctor_license: String,
    pub doctor_name: String,
    pub doctor_type: String,
    pub doctor_status: String,
    pub cmi_value: f64,
    pub specialty: String,
    pub insurance_payer: String,
    pub insurance_plan: String,
    pub payer_mix: String,
    pub case_type: CaseType,
    pub los: f64,
    pub severity: Severity,
    pub surgical_mix: String,
    pub discharge_time: String,
    pub discharge_before_noon: String,
    pub revenue: f64,
}

/// One admission observed on the live feed
///
/// Never edited in place; a correction arrives as delete + insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveAdmission {
    pub id: AdmissionId,
    pub patient_name: String,
    pub department: Department,
    pub severity: Severity,
    pub doctor_name: String,
    pub case_type: CaseType,
    pub created_at: DateTime<Utc>,
}

impl LiveAdmission {
    /// Builds the stored record for a validated submission
    pub fn from_normalized(
        id: AdmissionId,
        admission: NormalizedAdmission,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            patient_name: admission.patient_name,
            department: admission.department,
            severity: admission.severity,
            doctor_name: admission.doctor_name,
            case_type: admission.case_type,
            created_at,
        }
    }
}

/// Raw admission submission, as typed by a user
///
/// Severity is kept as the number entered; [`crate::core::validate`] decides
/// whether it is a whole level in range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdmissionPayload {
    pub patient_name: String,
    pub department: String,
    pub severity: f64,
    pub doctor_name: String,
    pub case_type: String,
}

/// A submission that passed field validation
///
/// Serializes to the insert body the admission store expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedAdmission {
    pub patient_name: String,
    pub department: Department,
    pub severity: Severity,
    pub doctor_name: String,
    pub case_type: CaseType,
}

/// Where a merged record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOrigin {
    Historical,
    Live,
}

/// Unified analytical record
///
/// Built only by [`crate::core::merge`]; owns no state of its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedRecord {
    pub origin: RecordOrigin,
    pub department: String,
    pub case_type: CaseType,
    pub severity: Severity,
    pub doctor_name: String,
    pub doctor_license: String,
    pub doctor_type: String,
    pub doctor_status: String,
    pub complexity: f64,
    pub los: f64,
    pub revenue: f64,
    pub month: MonthKey,
    pub payer_mix: String,
    /// `None` when the source has no discharge data
    pub discharged_before_noon: Option<bool>,
}
