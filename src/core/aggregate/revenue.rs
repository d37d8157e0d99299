//! Revenue by month

use super::OrderedGroups;
use crate::domain::{MergedRecord, MonthKey};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRevenue {
    /// `MM/YY`
    pub month: String,
    pub revenue: f64,
}

/// Revenue summed per reporting month, sorted by the `MM/YY` label
///
/// The label sort is lexicographic, so months from different years
/// interleave (`01/24`, `01/25`, `02/24`). Each month's sum is rounded to
/// a whole amount after summing.
pub fn revenue_by_month(records: &[MergedRecord]) -> Vec<MonthlyRevenue> {
    let mut groups: OrderedGroups<f64> = OrderedGroups::new();
    for record in records {
        *groups.entry(record.month.as_str(), || 0.0) += record.revenue;
    }

    let mut months: Vec<(String, String, f64)> = groups
        .into_entries()
        .into_iter()
        .map(|(key, revenue)| (MonthKey::new(key.as_str()).label(), key, revenue.round()))
        .collect();
    months.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    months
        .into_iter()
        .map(|(month, _, revenue)| MonthlyRevenue { month, revenue })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregate::tests_support::{in_month, record};
    use crate::domain::CaseType;

    #[test]
    fn test_sums_per_month() {
        let records = vec![
            in_month(record("Cardiology", CaseType::Inpatient, 1.0, 1.0, 100.0), "2024-02-01"),
            in_month(record("Emergency", CaseType::Outpatient, 0.0, 1.0, 50.0), "2024-01-01"),
            in_month(record("Cardiology", CaseType::Inpatient, 1.0, 1.0, 25.25), "2024-02-01"),
        ];
        assert_eq!(
            revenue_by_month(&records),
            vec![
                MonthlyRevenue {
                    month: "01/24".to_string(),
                    revenue: 50.0
                },
                MonthlyRevenue {
                    month: "02/24".to_string(),
                    revenue: 125.0
                },
            ]
        );
    }

    #[test]
    fn test_label_sort_interleaves_years() {
        let records = vec![
            in_month(record("Cardiology", CaseType::Inpatient, 1.0, 1.0, 1.0), "2025-01-01"),
            in_month(record("Cardiology", CaseType::Inpatient, 1.0, 1.0, 1.0), "2024-02-01"),
            in_month(record("Cardiology", CaseType::Inpatient, 1.0, 1.0, 1.0), "2024-01-01"),
        ];
        let labels: Vec<_> = revenue_by_month(&records)
            .into_iter()
            .map(|m| m.month)
            .collect();
        assert_eq!(labels, vec!["01/24", "01/25", "02/24"]);
    }

    #[test]
    fn test_rounds_after_summing() {
        let records = vec![
            in_month(record("Cardiology", CaseType::Inpatient, 1.0, 1.0, 0.3), "2024-03-01"),
            in_month(record("Cardiology", CaseType::Inpatient, 1.0, 1.0, 0.3), "2024-03-01"),
            in_month(record("Emergency", CaseType::Outpatient, 0.0, 1.0, 10.5), "2024-04-01"),
        ];
        let revenue: Vec<f64> = revenue_by_month(&records)
            .into_iter()
            .map(|m| m.revenue)
            .collect();
        assert_eq!(revenue, vec![1.0, 11.0]);
    }

    #[test]
    fn test_empty() {
        assert!(revenue_by_month(&[]).is_empty());
    }
}
