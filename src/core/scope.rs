//! Scope filtering
//!
//! Narrows a collection to what the caller may see. The authorization
//! decision is made elsewhere and passed in as an [`AccessScope`]; nothing
//! here reads ambient session state.

use crate::domain::{HistoricalRecord, LiveAdmission, MergedRecord};
use serde::{Deserialize, Serialize};

/// Records that carry a department the scope can match on
pub trait Scoped {
    fn scope_key(&self) -> &str;
}

impl Scoped for HistoricalRecord {
    fn scope_key(&self) -> &str {
        &self.specialty
    }
}

impl Scoped for LiveAdmission {
    fn scope_key(&self) -> &str {
        self.department.label()
    }
}

impl Scoped for MergedRecord {
    fn scope_key(&self) -> &str {
        &self.department
    }
}

/// Filters `records` to the caller's scope
///
/// Unrestricted callers get everything. Otherwise only records whose
/// department equals `scope` are kept, and a missing scope yields nothing.
///
/// # Examples
///
/// ```
/// use wardlens::core::scope::{filter_by_scope, Scoped};
///
/// #[derive(Clone)]
/// struct Row(&'static str);
/// impl Scoped for Row {
///     fn scope_key(&self) -> &str { self.0 }
/// }
///
/// let rows = vec![Row("Cardiology"), Row("Emergency")];
/// assert_eq!(filter_by_scope(&rows, Some("Cardiology"), false).len(), 1);
/// assert_eq!(filter_by_scope(&rows, None, true).len(), 2);
/// assert!(filter_by_scope(&rows, None, false).is_empty());
/// ```
pub fn filter_by_scope<T: Scoped + Clone>(
    records: &[T],
    scope: Option<&str>,
    unrestricted: bool,
) -> Vec<T> {
    if unrestricted {
        return records.to_vec();
    }
    match scope {
        Some(scope) => records
            .iter()
            .filter(|r| r.scope_key() == scope)
            .cloned()
            .collect(),
        None => Vec::new(),
    }
}

/// What the authorization collaborator decided for the current caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessScope {
    /// Sees every department
    #[serde(default)]
    pub unrestricted: bool,

    /// The single department a restricted caller may see
    #[serde(default)]
    pub department: Option<String>,
}

impl AccessScope {
    /// Caller that sees everything
    pub fn unrestricted() -> Self {
        Self {
            unrestricted: true,
            department: None,
        }
    }

    /// Caller limited to one department
    pub fn department(department: impl Into<String>) -> Self {
        Self {
            unrestricted: false,
            department: Some(department.into()),
        }
    }

    /// Applies [`filter_by_scope`] with this scope
    pub fn apply<T: Scoped + Clone>(&self, records: &[T]) -> Vec<T> {
        filter_by_scope(records, self.department.as_deref(), self.unrestricted)
    }

    /// Whether a single record is visible
    pub fn permits<T: Scoped>(&self, record: &T) -> bool {
        self.unrestricted || self.department.as_deref() == Some(record.scope_key())
    }

    /// Restricts this scope further to `department`
    ///
    /// Narrowing never widens: asking for a department outside a restricted
    /// scope yields a scope that sees nothing.
    pub fn narrow(&self, department: &str) -> Self {
        if self.unrestricted || self.department.as_deref() == Some(department) {
            Self::department(department)
        } else {
            Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::merge::merge;
    use crate::domain::{AdmissionId, CaseType, Department, Severity};
    use chrono::Utc;

    fn admission(id: &str, department: Department) -> LiveAdmission {
        LiveAdmission {
            id: AdmissionId::new(id).unwrap(),
            patient_name: "P".to_string(),
            department,
            severity: Severity::new(1).unwrap(),
            doctor_name: "Dr. Lily James".to_string(),
            case_type: CaseType::Outpatient,
            created_at: Utc::now(),
        }
    }

    fn admissions() -> Vec<LiveAdmission> {
        vec![
            admission("1", Department::Cardiology),
            admission("2", Department::Emergency),
            admission("3", Department::Cardiology),
        ]
    }

    #[test]
    fn test_unrestricted_returns_everything() {
        let all = admissions();
        assert_eq!(filter_by_scope(&all, None, true), all);
        assert_eq!(filter_by_scope(&all, Some("Emergency"), true), all);
    }

    #[test]
    fn test_restricted_keeps_only_scope() {
        let visible = filter_by_scope(&admissions(), Some("Cardiology"), false);
        assert_eq!(visible.len(), 2);
        assert!(visible
            .iter()
            .all(|a| a.department == Department::Cardiology));
    }

    #[test]
    fn test_restricted_without_scope_fails_closed() {
        assert!(filter_by_scope(&admissions(), None, false).is_empty());
    }

    #[test]
    fn test_unknown_scope_is_empty() {
        assert!(filter_by_scope(&admissions(), Some("Dermatology"), false).is_empty());
    }

    #[test]
    fn test_access_scope_on_merged_records() {
        let merged = merge(&[], &admissions());
        let scope = AccessScope::department("Emergency");
        let visible = scope.apply(&merged);
        assert_eq!(visible.len(), 1);
        assert!(scope.permits(&visible[0]));
        assert!(!scope.permits(&merged[0]));
        assert_eq!(AccessScope::unrestricted().apply(&merged).len(), 3);
        assert!(AccessScope::default().apply(&merged).is_empty());
    }

    #[test]
    fn test_narrow_within_scope() {
        assert_eq!(
            AccessScope::unrestricted().narrow("Emergency"),
            AccessScope::department("Emergency")
        );
        assert_eq!(
            AccessScope::department("Emergency").narrow("Emergency"),
            AccessScope::department("Emergency")
        );
    }

    #[test]
    fn test_narrow_outside_scope_sees_nothing() {
        let narrowed = AccessScope::department("Emergency").narrow("Cardiology");
        assert!(narrowed.apply(&admissions()).is_empty());
    }
}
