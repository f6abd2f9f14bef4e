use crate::model::ParsedRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AggregationKey {
    pub label: String,
    pub code: String,
    pub description: String,
}

/// Summed quantities for one document, keyed by (label, code, description).
///
/// Labels are reported in the order they were first seen.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    labels: Vec<String>,
    totals: BTreeMap<AggregationKey, u64>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a label so it is persisted even if no record lands on it.
    pub fn ensure_label(&mut self, label: &str) {
        if !self.labels.iter().any(|l| l == label) {
            self.labels.push(label.to_string());
        }
    }

    pub fn add(&mut self, label: &str, record: &ParsedRecord) {
        self.ensure_label(label);
        let key = AggregationKey {
            label: label.to_string(),
            code: record.code.clone(),
            description: record.description.clone(),
        };
        let total = self.totals.entry(key).or_insert(0);
        *total = total.saturating_add(record.quantity);
    }

    pub fn get(&self, label: &str, code: &str, description: &str) -> Option<u64> {
        let key = AggregationKey {
            label: label.to_string(),
            code: code.to_string(),
            description: description.to_string(),
        };
        self.totals.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Split the totals into one persistable unit per label.
    pub fn into_label_totals(self) -> Vec<LabelTotals> {
        let mut by_label: BTreeMap<String, Vec<AggregatedLine>> = BTreeMap::new();
        for (key, quantity) in self.totals {
            by_label.entry(key.label).or_default().push(AggregatedLine {
                code: key.code,
                description: key.description,
                quantity,
            });
        }

        self.labels
            .into_iter()
            .map(|label| {
                let lines = by_label.remove(&label).unwrap_or_default();
                LabelTotals { label, lines }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedLine {
    pub code: String,
    pub description: String,
    pub quantity: u64,
}

/// All aggregated lines for one label, sorted by (code, description).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelTotals {
    pub label: String,
    pub lines: Vec<AggregatedLine>,
}

impl LabelTotals {
    /// Number of distinct (code, description) pairs.
    pub fn product_count(&self) -> usize {
        self.lines.len()
    }

    pub fn total_quantity(&self) -> u64 {
        self.lines
            .iter()
            .fold(0u64, |acc, l| acc.saturating_add(l.quantity))
    }
}
