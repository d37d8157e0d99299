//! Admission roster
//!
//! Search, filter, sort and paginate live admissions for a tabular listing.

use crate::domain::{CaseType, LiveAdmission};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Rows per page
pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    PatientName,
    Department,
    Severity,
    #[default]
    CreatedAt,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Roster query; the default lists newest admissions first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterQuery {
    /// Case-insensitive substring of the patient name
    pub search: Option<String>,
    pub case_type: Option<CaseType>,
    pub sort_key: SortKey,
    pub sort_dir: SortDirection,
    /// Zero-based
    pub page: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterPage {
    pub rows: Vec<LiveAdmission>,
    /// Rows matching the query across all pages
    pub total: usize,
    pub page: usize,
    /// Always at least 1
    pub total_pages: usize,
}

impl RosterQuery {
    /// Applies the query to `admissions`
    pub fn run(&self, admissions: &[LiveAdmission]) -> RosterPage {
        let needle = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut rows: Vec<&LiveAdmission> = admissions
            .iter()
            .filter(|a| match &needle {
                Some(needle) => a.patient_name.to_lowercase().contains(needle.as_str()),
                None => true,
            })
            .filter(|a| self.case_type.map_or(true, |ct| a.case_type == ct))
            .collect();

        rows.sort_by(|a, b| {
            let ordering = compare(self.sort_key, a, b);
            match self.sort_dir {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        let total = rows.len();
        let total_pages = total.div_ceil(PAGE_SIZE).max(1);
        RosterPage {
            rows: rows
                .into_iter()
                .skip(self.page.saturating_mul(PAGE_SIZE))
                .take(PAGE_SIZE)
                .cloned()
                .collect(),
            total,
            page: self.page,
            total_pages,
        }
    }
}

fn compare(key: SortKey, a: &LiveAdmission, b: &LiveAdmission) -> Ordering {
    match key {
        SortKey::PatientName => compare_text(&a.patient_name, &b.patient_name),
        SortKey::Department => compare_text(a.department.label(), b.department.label()),
        SortKey::Severity => a.severity.cmp(&b.severity),
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
