//! Payer and severity distributions

use super::OrderedGroups;
use crate::domain::MergedRecord;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayerShare {
    pub name: String,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeverityCount {
    /// `Level N`
    pub severity: String,
    pub count: usize,
}

/// Record count per payer-mix category, in first-seen order
pub fn payer_distribution(records: &[MergedRecord]) -> Vec<PayerShare> {
    let mut groups: OrderedGroups<usize> = OrderedGroups::new();
    for record in records {
        *groups.entry(&record.payer_mix, || 0) += 1;
    }
    groups
        .into_entries()
        .into_iter()
        .map(|(name, value)| PayerShare { name, value })
        .collect()
}

/// Record count per severity level, sorted by label
pub fn severity_distribution(records: &[MergedRecord]) -> Vec<SeverityCount> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.severity.label()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(severity, count)| SeverityCount { severity, count })
        .collect()
}
