//! Department workload and doctor caseload

use super::OrderedGroups;
use crate::domain::MergedRecord;
use serde::Serialize;
use std::collections::HashSet;

/// Labels longer than this are shortened for display
pub const LABEL_MAX_CHARS: usize = 15;
/// Characters kept from a shortened label, before the ellipsis
pub const LABEL_KEEP_CHARS: usize = 13;

/// Workload of a single department
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentWorkload {
    /// Display label, possibly truncated
    pub department: String,
    pub full_name: String,
    pub patients: usize,
    /// Distinct doctor names
    pub doctors: usize,
}

/// Number of cases handled by one doctor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoctorCaseload {
    pub doctor: String,
    pub cases: usize,
}

/// Shortens a department label to fit a chart axis
pub fn display_label(name: &str) -> String {
    if name.chars().count() > LABEL_MAX_CHARS {
        let kept: String = name.chars().take(LABEL_KEEP_CHARS).collect();
        format!("{kept}…")
    } else {
        name.to_string()
    }
}

/// Record and distinct-doctor counts per department
///
/// Sorted by record count, largest first. Departments with equal counts keep
/// the order in which they first appear.
pub fn workload_by_department(records: &[MergedRecord]) -> Vec<DepartmentWorkload> {
    let mut groups: OrderedGroups<(usize, HashSet<&str>)> = OrderedGroups::new();
    for record in records {
        let (patients, doctors) = groups.entry(&record.department, || (0, HashSet::new()));
        *patients += 1;
        doctors.insert(record.doctor_name.as_str());
    }

    let mut workload: Vec<DepartmentWorkload> = groups
        .into_entries()
        .into_iter()
        .map(|(name, (patients, doctors))| DepartmentWorkload {
            department: display_label(&name),
            full_name: name,
            patients,
            doctors: doctors.len(),
        })
        .collect();
    workload.sort_by(|a, b| b.patients.cmp(&a.patients));
    workload
}

/// The `limit` doctors with the most cases
pub fn top_doctors(records: &[MergedRecord], limit: usize) -> Vec<DoctorCaseload> {
    let mut groups: OrderedGroups<usize> = OrderedGroups::new();
    for record in records {
        *groups.entry(&record.doctor_name, || 0) += 1;
    }

    let mut caseload: Vec<DoctorCaseload> = groups
        .into_entries()
        .into_iter()
        .map(|(doctor, cases)| DoctorCaseload { doctor, cases })
        .collect();
    caseload.sort_by(|a, b| b.cases.cmp(&a.cases));
    caseload.truncate(limit);
    caseload
}
