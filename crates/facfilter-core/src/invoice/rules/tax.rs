//! IVA/IGIC tax code rules.

use super::amounts::{gross_matches, ArithmeticMode};
use crate::models::record_set::Row;
use crate::schema::Field;

/// The two mutually exclusive tax rate columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaxKind {
    Iva,
    Igic,
}

impl TaxKind {
    /// Column holding this tax rate.
    pub fn field(self) -> Field {
        match self {
            TaxKind::Iva => Field::Iva,
            TaxKind::Igic => Field::Igic,
        }
    }
}

/// Exactly one of IVA and IGIC is filled in.
pub fn has_single_tax_code(row: &Row<'_>) -> bool {
    row.has_value(Field::Iva) != row.has_value(Field::Igic)
}

/// When the row carries `kind`, its gross equals net plus that tax.
///
/// A row without this tax passes: there is nothing to have computed wrongly.
pub fn tax_is_consistent(row: &Row<'_>, kind: TaxKind, mode: ArithmeticMode) -> bool {
    let rate = row.value_or_empty(kind.field());
    if rate.is_empty() {
        return true;
    }

    gross_matches(
        row.value_or_empty(Field::Gross),
        row.value_or_empty(Field::Net),
        rate,
        mode,
    )
}
