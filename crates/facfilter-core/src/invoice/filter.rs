//! Business-rule filtering of validated exports.

use tracing::{debug, trace};

use super::rules::{ArithmeticMode, InvoiceNumberFrequency, RuleContext};
use crate::models::record_set::RecordSet;
use crate::report::{FilterReport, RejectedRow};

/// Line number of the first record (the header is line 1).
const FIRST_ROW_LINE: usize = 2;

/// Filter `records` with default settings. See [`InvoiceFilter::filter`].
pub fn filter_invoices(records: &RecordSet) -> RecordSet {
    InvoiceFilter::new().filter(records)
}

/// Keeps the rows of a validated export that satisfy every business rule.
#[derive(Debug, Clone, Default)]
pub struct InvoiceFilter {
    /// Arithmetic used by the tax calculation rules.
    arithmetic: ArithmeticMode,
}

impl InvoiceFilter {
    pub fn new() -> Self {
        Self {
            arithmetic: ArithmeticMode::Float,
        }
    }

    /// Set the arithmetic used by the tax calculation rules.
    pub fn with_arithmetic(mut self, arithmetic: ArithmeticMode) -> Self {
        self.arithmetic = arithmetic;
        self
    }

    /// Keep the rows that pass every rule, in their original order.
    ///
    /// The header is carried over unchanged, even when no row survives.
    /// Expects input that already passed validation; columns missing from a
    /// row are read as empty, so this never fails.
    pub fn filter(&self, records: &RecordSet) -> RecordSet {
        self.filter_with_report(records).0
    }

    /// Same as [`filter`](Self::filter), also reporting every dropped row with
    /// all the rules it broke.
    pub fn filter_with_report(&self, records: &RecordSet) -> (RecordSet, FilterReport) {
        let frequency = InvoiceNumberFrequency::from_records(records);
        let duplicates = frequency.duplicates();
        if !duplicates.is_empty() {
            debug!("Repeated invoice numbers: {}", duplicates.join(", "));
        }

        let context = RuleContext::new(frequency, self.arithmetic);

        let mut kept = Vec::with_capacity(records.row_count());
        let mut rejected = Vec::new();

        for (offset, row) in records.rows().enumerate() {
            let violations = context.violations(&row);
            if violations.is_empty() {
                kept.push(row.line().to_string());
            } else {
                let line = FIRST_ROW_LINE + offset;
                trace!("Dropping line {}: {:?}", line, violations);
                rejected.push(RejectedRow {
                    line,
                    content: row.line().to_string(),
                    violations,
                });
            }
        }

        debug!(
            "Kept {} of {} rows ({} rejected)",
            kept.len(),
            records.row_count(),
            rejected.len()
        );

        let report = FilterReport {
            total_rows: records.row_count(),
            kept_rows: kept.len(),
            rejected,
        };

        (RecordSet::new(records.header.clone(), kept), report)
    }
}
