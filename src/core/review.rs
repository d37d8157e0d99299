//! Operational review
//!
//! Turns a merged dataset into a short list of action items: inactive
//! doctors still holding cases, high-severity load, late discharges, long
//! stays, and a case-mix benchmark line.

use crate::core::aggregate::calculate_cmi;
use crate::domain::MergedRecord;
use serde::Serialize;
use std::fmt;

/// Stays longer than this many days are flagged
pub const EXTENDED_STAY_DAYS: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewLevel {
    Critical,
    Warning,
    Info,
}

impl fmt::Display for ReviewLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReviewLevel::Critical => "critical",
            ReviewLevel::Warning => "warning",
            ReviewLevel::Info => "info",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewItem {
    pub level: ReviewLevel,
    pub title: String,
    pub description: String,
}

impl ReviewItem {
    fn new(level: ReviewLevel, title: String, description: impl Into<String>) -> Self {
        Self {
            level,
            title,
            description: description.into(),
        }
    }
}

/// Builds the review list, empty for an empty dataset
pub fn review(records: &[MergedRecord]) -> Vec<ReviewItem> {
    if records.is_empty() {
        return Vec::new();
    }

    let mut items = Vec::new();

    let mut inactive: Vec<&str> = Vec::new();
    for record in records.iter().filter(|r| r.doctor_status == "Inactive") {
        if !inactive.contains(&record.doctor_name.as_str()) {
            inactive.push(&record.doctor_name);
        }
    }
    if !inactive.is_empty() {
        items.push(ReviewItem::new(
            ReviewLevel::Critical,
            format!("{} Inactive Doctor(s) with Assigned Cases", inactive.len()),
            format!(
                "Doctors: {}. Cases assigned to inactive physicians require reassignment.",
                inactive.join(", ")
            ),
        ));
    }

    let high_severity = records.iter().filter(|r| r.severity.is_high()).count();
    if high_severity > 0 {
        items.push(ReviewItem::new(
            ReviewLevel::Warning,
            format!("{high_severity} High Severity Cases (Level 3)"),
            "These cases require elevated monitoring and resource allocation.",
        ));
    }

    let late = records
        .iter()
        .filter(|r| r.discharged_before_noon == Some(false))
        .count();
    items.push(ReviewItem::new(
        ReviewLevel::Info,
        format!("{late} Late Discharges (After 12 PM)"),
        "Optimizing discharge timing can improve bed turnover rates.",
    ));

    let extended = records
        .iter()
        .filter(|r| r.los > EXTENDED_STAY_DAYS)
        .count();
    if extended > 0 {
        items.push(ReviewItem::new(
            ReviewLevel::Warning,
            format!("{extended} Extended Stay Cases (>5 Days)"),
            "Review for potential discharge planning improvements.",
        ));
    }

    items.push(ReviewItem::new(
        ReviewLevel::Info,
        "CMI Benchmarking Complete".to_string(),
        format!(
            "Average CMI across all cases is {:.3}. Within acceptable range.",
            calculate_cmi(records)
        ),
    ));

    items
}
