//! Row-level business rules for invoice exports.
//!
//! Every rule is an independent predicate over a single row. A row survives
//! filtering only when all of [`Rule::ALL`] pass. Rules that need a view of
//! the whole export (invoice number uniqueness) read it from a
//! [`RuleContext`] built before any row is judged.

pub mod amounts;
pub mod identifiers;
pub mod patterns;
pub mod tax;
pub mod uniqueness;

pub use amounts::{is_valid_amount, ArithmeticMode};
pub use identifiers::has_single_identifier;
pub use tax::{has_single_tax_code, tax_is_consistent, TaxKind};
pub use uniqueness::InvoiceNumberFrequency;

use serde::{Deserialize, Serialize};

use crate::models::record_set::Row;

/// A business rule every kept row must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// The invoice number occurs exactly once in the whole export.
    UniqueInvoiceNumber,
    /// Exactly one of IVA and IGIC is filled in.
    SingleTaxCode,
    /// Exactly one of CIF and NIF is filled in.
    SingleIdentifier,
    /// When IVA is filled in, gross equals net plus IVA.
    IvaCalculation,
    /// When IGIC is filled in, gross equals net plus IGIC.
    IgicCalculation,
}

impl Rule {
    /// All rules, in evaluation order.
    pub const ALL: [Rule; 5] = [
        Rule::UniqueInvoiceNumber,
        Rule::SingleTaxCode,
        Rule::SingleIdentifier,
        Rule::IvaCalculation,
        Rule::IgicCalculation,
    ];

    /// Stable identifier used in reports.
    pub fn code(self) -> &'static str {
        match self {
            Rule::UniqueInvoiceNumber => "unique_invoice_number",
            Rule::SingleTaxCode => "single_tax_code",
            Rule::SingleIdentifier => "single_identifier",
            Rule::IvaCalculation => "iva_calculation",
            Rule::IgicCalculation => "igic_calculation",
        }
    }

    /// Human readable description of what the rule requires.
    pub fn description(self) -> &'static str {
        match self {
            Rule::UniqueInvoiceNumber => "invoice number must be unique",
            Rule::SingleTaxCode => "exactly one of IVA and IGIC must be set",
            Rule::SingleIdentifier => "exactly one of CIF and NIF must be set",
            Rule::IvaCalculation => "gross must equal net plus IVA",
            Rule::IgicCalculation => "gross must equal net plus IGIC",
        }
    }

    /// Whether `row` satisfies this rule.
    pub fn check(self, row: &Row<'_>, context: &RuleContext<'_>) -> bool {
        match self {
            Rule::UniqueInvoiceNumber => context.frequency.is_unique(row),
            Rule::SingleTaxCode => has_single_tax_code(row),
            Rule::SingleIdentifier => has_single_identifier(row),
            Rule::IvaCalculation => tax_is_consistent(row, TaxKind::Iva, context.arithmetic),
            Rule::IgicCalculation => tax_is_consistent(row, TaxKind::Igic, context.arithmetic),
        }
    }
}

/// Export-wide state the rules are evaluated against.
#[derive(Debug)]
pub struct RuleContext<'a> {
    /// Invoice number counts over every input row.
    pub frequency: InvoiceNumberFrequency<'a>,
    /// Arithmetic for the tax calculation rules.
    pub arithmetic: ArithmeticMode,
}

impl<'a> RuleContext<'a> {
    pub fn new(frequency: InvoiceNumberFrequency<'a>, arithmetic: ArithmeticMode) -> Self {
        Self {
            frequency,
            arithmetic,
        }
    }

    /// Every rule `row` violates, in rule order. Empty when the row is kept.
    pub fn violations(&self, row: &Row<'_>) -> Vec<Rule> {
        Rule::ALL
            .into_iter()
            .filter(|rule| !rule.check(row, self))
            .collect()
    }
}
