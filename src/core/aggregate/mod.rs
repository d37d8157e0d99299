//! Aggregate views over merged records
//!
//! Every function here is a pure reducer over `&[MergedRecord]`: no I/O, no
//! mutation of the input, and a defined value for empty input.
//!
//! - [`metrics`] - ALOS, CMI, totals
//! - [`workload`] - per-department workload and doctor caseload
//! - [`revenue`] - revenue by month
//! - [`trends`] - department × month matrix and department summaries
//! - [`distribution`] - payer and severity distributions
//!
//! # Example
//!
//! ```rust
//! use wardlens::core::aggregate::{calculate_alos, calculate_cmi, severity_distribution};
//!
//! assert_eq!(calculate_alos(&[]), 0.0);
//! assert_eq!(calculate_cmi(&[]), 0.0);
//! assert!(severity_distribution(&[]).is_empty());
//! ```

pub mod distribution;
pub mod metrics;
pub mod revenue;
pub mod trends;
pub mod workload;

#[cfg(test)]
pub(crate) mod tests_support;

pub use distribution::{payer_distribution, severity_distribution, PayerShare, SeverityCount};
pub use metrics::{calculate_alos, calculate_cmi, total_revenue};
pub use revenue::{revenue_by_month, MonthlyRevenue};
pub use trends::{
    department_names, department_summary, department_trends, DepartmentSummary, TrendCell,
    TrendMatrix, TrendPoint,
};
pub use workload::{top_doctors, workload_by_department, DepartmentWorkload, DoctorCaseload};

use std::collections::HashMap;

/// Groups keyed by string, iterated in first-seen order
pub(crate) struct OrderedGroups<V> {
    index: HashMap<String, usize>,
    entries: Vec<(String, V)>,
}

impl<V> OrderedGroups<V> {
    pub(crate) fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    pub(crate) fn entry(&mut self, key: &str, init: impl FnOnce() -> V) -> &mut V {
        let position = match self.index.get(key) {
            Some(&position) => position,
            None => {
                self.entries.push((key.to_string(), init()));
                self.index.insert(key.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[position].1
    }

    pub(crate) fn into_entries(self) -> Vec<(String, V)> {
        self.entries
    }
}

/// Rounds to two decimals
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
