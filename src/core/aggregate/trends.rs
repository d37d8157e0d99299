//! Department trends and per-department summaries

use super::{calculate_alos, calculate_cmi, round2, total_revenue};
use crate::domain::{MergedRecord, MonthKey};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Running totals for one department in one month
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrendCell {
    pub cases: usize,
    pub revenue: f64,
    /// Summed length of stay over inpatient and day-case records
    pub total_los: f64,
    pub admitted_cases: usize,
}

impl TrendCell {
    fn add(&mut self, record: &MergedRecord) {
        self.cases += 1;
        self.revenue += record.revenue;
        if record.case_type.is_admitted() {
            self.total_los += record.los;
            self.admitted_cases += 1;
        }
    }

    /// Average length of stay for the cell, 0 without admitted cases
    pub fn alos(&self) -> f64 {
        if self.admitted_cases == 0 {
            0.0
        } else {
            self.total_los / self.admitted_cases as f64
        }
    }
}

/// Department → month → totals
pub type TrendMatrix = BTreeMap<String, BTreeMap<MonthKey, TrendCell>>;

/// Builds the department × month matrix
pub fn department_trends(records: &[MergedRecord]) -> TrendMatrix {
    let mut matrix = TrendMatrix::new();
    for record in records {
        matrix
            .entry(record.department.clone())
            .or_default()
            .entry(record.month.clone())
            .or_default()
            .add(record);
    }
    matrix
}

/// One month of a department's trend line, ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    /// `MM/YY`
    pub month: String,
    pub cases: usize,
    /// Rounded to the nearest unit
    pub revenue: f64,
    /// Rounded to two decimals
    pub alos: f64,
}

/// Headline figures for a single department
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentSummary {
    pub department: String,
    pub alos: f64,
    pub cmi: f64,
    pub total_cases: usize,
    pub total_revenue: f64,
    /// Distinct doctors, in first-seen order
    pub doctors: Vec<String>,
    pub trend: Vec<TrendPoint>,
}

/// Distinct department names, sorted
pub fn department_names(records: &[MergedRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.department.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Summarizes one department, or `None` if it has no records
pub fn department_summary(records: &[MergedRecord], department: &str) -> Option<DepartmentSummary> {
    let subset: Vec<MergedRecord> = records
        .iter()
        .filter(|r| r.department == department)
        .cloned()
        .collect();
    if subset.is_empty() {
        return None;
    }

    let mut doctors: Vec<String> = Vec::new();
    for record in &subset {
        if !doctors.contains(&record.doctor_name) {
            doctors.push(record.doctor_name.clone());
        }
    }

    let matrix = department_trends(&subset);
    let mut trend: Vec<(String, &MonthKey, &TrendCell)> = matrix
        .get(department)
        .into_iter()
        .flat_map(|months| months.iter())
        .map(|(key, cell)| (key.label(), key, cell))
        .collect();
    trend.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));

    Some(DepartmentSummary {
        department: department.to_string(),
        alos: calculate_alos(&subset),
        cmi: calculate_cmi(&subset),
        total_cases: subset.len(),
        total_revenue: total_revenue(&subset),
        doctors,
        trend: trend
            .into_iter()
            .map(|(month, _, cell)| TrendPoint {
                month,
                cases: cell.cases,
                revenue: cell.revenue.round(),
                alos: round2(cell.alos()),
            })
            .collect(),
    })
}
