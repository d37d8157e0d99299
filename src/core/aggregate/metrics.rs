//! Headline metrics

use crate::domain::MergedRecord;

/// Average length of stay over inpatient and day-case records
///
/// Outpatient records are ignored; 0 when there is nothing to average.
pub fn calculate_alos(records: &[MergedRecord]) -> f64 {
    let (total, count) = records
        .iter()
        .filter(|r| r.case_type.is_admitted())
        .fold((0.0, 0usize), |(total, count), r| (total + r.los, count + 1));

    if count == 0 {
        return 0.0;
    }
    total / count as f64
}

/// Case-mix index: mean complexity over all records, 0 when empty
pub fn calculate_cmi(records: &[MergedRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    records.iter().map(|r| r.complexity).sum::<f64>() / records.len() as f64
}

/// Sum of revenue over all records
pub fn total_revenue(records: &[MergedRecord]) -> f64 {
    records.iter().map(|r| r.revenue).sum()
}
