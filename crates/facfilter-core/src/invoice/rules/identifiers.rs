//! CIF/NIF customer identifier rule.

use crate::models::record_set::Row;
use crate::schema::Field;

/// Exactly one of CIF and NIF is filled in.
pub fn has_single_identifier(row: &Row<'_>) -> bool {
    row.has_value(Field::Cif) != row.has_value(Field::Nif)
}
