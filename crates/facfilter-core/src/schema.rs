//! The fixed invoice export schema.
//!
//! Column order is part of the format: a field's position in [`Field::ALL`] is
//! its column index in every row, and the canonical header is the field names
//! joined by [`FIELD_SEPARATOR`].

use std::fmt;

use lazy_static::lazy_static;

/// Separator between the columns of a line.
pub const FIELD_SEPARATOR: char = ',';

/// Separator between lines.
pub const LINE_SEPARATOR: char = '\n';

/// A column of the invoice export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Invoice number (`Num_factura`).
    InvoiceNumber,
    /// Issue date (`Fecha`), carried through untouched.
    Date,
    /// Gross amount, tax included (`Bruto`).
    Gross,
    /// Net amount, before tax (`Neto`).
    Net,
    /// IVA tax rate in percent (`IVA`).
    Iva,
    /// IGIC tax rate in percent (`IGIC`).
    Igic,
    /// Free-text description (`Concepto`).
    Description,
    /// Business customer identifier (`CIF_cliente`).
    Cif,
    /// Individual customer identifier (`NIF_cliente`).
    Nif,
}

impl Field {
    /// All fields in column order.
    pub const ALL: [Field; 9] = [
        Field::InvoiceNumber,
        Field::Date,
        Field::Gross,
        Field::Net,
        Field::Iva,
        Field::Igic,
        Field::Description,
        Field::Cif,
        Field::Nif,
    ];

    /// Fields that must hold an unsigned integer literal (or nothing).
    pub const AMOUNTS: [Field; 4] = [Field::Gross, Field::Net, Field::Iva, Field::Igic];

    /// Number of columns in the schema.
    pub const COUNT: usize = Self::ALL.len();

    /// Column name as it appears in the header line.
    pub fn name(self) -> &'static str {
        match self {
            Field::InvoiceNumber => "Num_factura",
            Field::Date => "Fecha",
            Field::Gross => "Bruto",
            Field::Net => "Neto",
            Field::Iva => "IVA",
            Field::Igic => "IGIC",
            Field::Description => "Concepto",
            Field::Cif => "CIF_cliente",
            Field::Nif => "NIF_cliente",
        }
    }

    /// Column index of this field within a row.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

lazy_static! {
    static ref CANONICAL_HEADER: String = Field::ALL
        .iter()
        .map(|field| field.name())
        .collect::<Vec<_>>()
        .join(FIELD_SEPARATOR.to_string().as_str());
}

/// The only header line an export may start with.
pub fn canonical_header() -> &'static str {
    CANONICAL_HEADER.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_header() {
        assert_eq!(
            canonical_header(),
            "Num_factura,Fecha,Bruto,Neto,IVA,IGIC,Concepto,CIF_cliente,NIF_cliente"
        );
    }

    #[test]
    fn test_index_matches_position() {
        for (position, field) in Field::ALL.iter().enumerate() {
            assert_eq!(field.index(), position);
        }
        assert_eq!(Field::COUNT, 9);
    }
}
