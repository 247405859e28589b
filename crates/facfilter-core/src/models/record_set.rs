//! Header-plus-rows representation of an export.

use std::fmt;

use crate::schema::{Field, FIELD_SEPARATOR, LINE_SEPARATOR};

/// An export split into its header line and its record lines.
///
/// Rows are kept as raw lines in input order; every stage builds a new
/// `RecordSet` instead of mutating one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    /// Header line as received.
    pub header: String,
    /// Record lines as received, in input order.
    pub rows: Vec<String>,
}

impl RecordSet {
    pub fn new(header: impl Into<String>, rows: Vec<String>) -> Self {
        Self {
            header: header.into(),
            rows,
        }
    }

    /// A record set with no rows.
    pub fn header_only(header: impl Into<String>) -> Self {
        Self::new(header, Vec::new())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Positional views over the rows, in order.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(|line| Row::parse(line))
    }
}

impl fmt::Display for RecordSet {
    /// Header and rows joined by the line separator, no trailing separator.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.header)?;
        for row in &self.rows {
            write!(f, "{}{}", LINE_SEPARATOR, row)?;
        }
        Ok(())
    }
}

/// A record line viewed as columns. Field values are looked up by schema
/// position; a column past the end of the line is `None`.
#[derive(Debug, Clone)]
pub struct Row<'a> {
    line: &'a str,
    columns: Vec<&'a str>,
}

impl<'a> Row<'a> {
    /// Split a line on the field separator. No quoting is recognised.
    pub fn parse(line: &'a str) -> Self {
        Self {
            line,
            columns: line.split(FIELD_SEPARATOR).collect(),
        }
    }

    /// Value of `field`, or `None` when the line is too short to hold it.
    pub fn value(&self, field: Field) -> Option<&'a str> {
        self.columns.get(field.index()).copied()
    }

    /// Value of `field`, with an absent column read as empty.
    pub fn value_or_empty(&self, field: Field) -> &'a str {
        self.value(field).unwrap_or("")
    }

    /// Whether `field` holds a non-empty value.
    pub fn has_value(&self, field: Field) -> bool {
        !self.value_or_empty(field).is_empty()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// The raw line this row was built from.
    pub fn line(&self) -> &'a str {
        self.line
    }
}
