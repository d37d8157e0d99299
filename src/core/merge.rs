//! Dataset merger
//!
//! Projects historical and live records into [`MergedRecord`]. This is the
//! only place that knows how a live admission stands in for the historical
//! columns it does not carry; aggregates never look at the origin.

use crate::domain::{
    CaseType, HistoricalRecord, LiveAdmission, MergedRecord, MonthKey, RecordOrigin,
};

/// Complexity score assumed for live admissions
pub const LIVE_COMPLEXITY: f64 = 1.0;
/// Payer-mix category assumed for live admissions
pub const LIVE_PAYER_MIX: &str = "Insurance";
/// Doctor license recorded for live admissions
pub const LIVE_DOCTOR_LICENSE: &str = "LIVE";
/// Doctor type recorded for live admissions
pub const LIVE_DOCTOR_TYPE: &str = "Live";
/// Doctor status recorded for live admissions
pub const LIVE_DOCTOR_STATUS: &str = "Unverified";

/// A record tagged with its origin
#[derive(Debug, Clone, Copy)]
pub enum SourceRecord<'a> {
    Historical(&'a HistoricalRecord),
    Live(&'a LiveAdmission),
}

impl SourceRecord<'_> {
    /// Projects the record into the merged schema
    pub fn project(self) -> MergedRecord {
        match self {
            SourceRecord::Historical(r) => MergedRecord {
                origin: RecordOrigin::Historical,
                department: r.specialty.clone(),
                case_type: r.case_type,
                severity: r.severity,
                doctor_name: r.doctor_name.clone(),
                doctor_license: r.doctor_license.clone(),
                doctor_type: r.doctor_type.clone(),
                doctor_status: r.doctor_status.clone(),
                complexity: r.cmi_value,
                los: r.los,
                revenue: r.revenue,
                month: r.month.clone(),
                payer_mix: r.payer_mix.clone(),
                discharged_before_noon: match r.discharge_before_noon.trim() {
                    "Yes" => Some(true),
                    "No" => Some(false),
                    _ => None,
                },
            },
            SourceRecord::Live(a) => MergedRecord {
                origin: RecordOrigin::Live,
                department: a.department.label().to_string(),
                case_type: a.case_type,
                severity: a.severity,
                doctor_name: a.doctor_name.clone(),
                doctor_license: LIVE_DOCTOR_LICENSE.to_string(),
                doctor_type: LIVE_DOCTOR_TYPE.to_string(),
                doctor_status: LIVE_DOCTOR_STATUS.to_string(),
                complexity: LIVE_COMPLEXITY,
                los: default_live_los(a.case_type),
                revenue: 0.0,
                month: MonthKey::from_timestamp(&a.created_at),
                payer_mix: LIVE_PAYER_MIX.to_string(),
                discharged_before_noon: None,
            },
        }
    }
}

/// Length of stay assumed for a live admission, in days
pub fn default_live_los(case_type: CaseType) -> f64 {
    match case_type {
        CaseType::Inpatient => 3.0,
        CaseType::DayCase => 1.0,
        CaseType::Outpatient => 0.0,
    }
}

/// Merges both sources, historical first, each in its own order
///
/// # Examples
///
/// ```
/// use wardlens::core::merge::merge;
///
/// let merged = merge(&[], &[]);
/// assert!(merged.is_empty());
/// ```
pub fn merge(historical: &[HistoricalRecord], live: &[LiveAdmission]) -> Vec<MergedRecord> {
    historical
        .iter()
        .map(SourceRecord::Historical)
        .chain(live.iter().map(SourceRecord::Live))
        .map(SourceRecord::project)
        .collect()
}
