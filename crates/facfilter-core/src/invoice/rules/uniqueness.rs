//! Invoice number frequency over a whole export.

use std::collections::HashMap;

use crate::models::record_set::{RecordSet, Row};
use crate::schema::Field;

/// How many times each invoice number occurs across all input rows.
///
/// Built in a first pass over every row so that a row's uniqueness never
/// depends on which other rows were dropped by other rules.
#[derive(Debug, Default)]
pub struct InvoiceNumberFrequency<'a> {
    counts: HashMap<&'a str, usize>,
}

impl<'a> InvoiceNumberFrequency<'a> {
    /// Count invoice numbers over every row of `records`.
    pub fn from_records(records: &'a RecordSet) -> Self {
        let mut counts: HashMap<&'a str, usize> = HashMap::new();

        for row in records.rows() {
            *counts.entry(row.value_or_empty(Field::InvoiceNumber)).or_insert(0) += 1;
        }

        Self { counts }
    }

    /// Occurrences of `invoice_number` in the export.
    pub fn count(&self, invoice_number: &str) -> usize {
        self.counts.get(invoice_number).copied().unwrap_or(0)
    }

    /// Whether the row's invoice number occurs exactly once.
    pub fn is_unique(&self, row: &Row<'_>) -> bool {
        self.count(row.value_or_empty(Field::InvoiceNumber)) == 1
    }

    /// Invoice numbers that occur more than once.
    pub fn duplicates(&self) -> Vec<&'a str> {
        let mut duplicates: Vec<&'a str> = self
            .counts
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(number, _)| *number)
            .collect();
        duplicates.sort_unstable();
        duplicates
    }
}
