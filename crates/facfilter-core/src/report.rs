//! Per-row account of what the filter dropped and why.

use serde::{Deserialize, Serialize};

use crate::invoice::Rule;

/// Outcome of filtering one export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterReport {
    /// Rows in the input.
    pub total_rows: usize,
    /// Rows that passed every rule.
    pub kept_rows: usize,
    /// Dropped rows, in input order.
    pub rejected: Vec<RejectedRow>,
}

/// A dropped row and every rule it violated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRow {
    /// Line number in the input (the header is line 1).
    pub line: usize,
    /// The raw line.
    pub content: String,
    /// Violated rules, in evaluation order.
    pub violations: Vec<Rule>,
}

impl FilterReport {
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }

    /// How many dropped rows broke each rule, in rule order. Rules nobody
    /// broke are included with a zero count.
    pub fn violation_counts(&self) -> Vec<(Rule, usize)> {
        Rule::ALL
            .into_iter()
            .map(|rule| {
                let count = self
                    .rejected
                    .iter()
                    .filter(|row| row.violations.contains(&rule))
                    .count();
                (rule, count)
            })
            .collect()
    }
}
