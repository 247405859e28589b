//! Fail-fast header and amount validation.

use tracing::debug;

use super::rules::is_valid_amount;
use crate::error::ValidationError;
use crate::models::record_set::{RecordSet, Row};
use crate::schema::{canonical_header, Field};

/// Line number of the first record (the header is line 1).
const FIRST_ROW_LINE: usize = 2;

/// Validate `records` with default settings. See [`Validator::validate`].
pub fn validate(records: RecordSet) -> Result<RecordSet, ValidationError> {
    Validator::new().validate(records)
}

/// Checks that an export conforms to the schema before it is filtered.
#[derive(Debug, Clone)]
pub struct Validator {
    /// Whether rows may carry columns beyond the schema.
    allow_extra_columns: bool,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            allow_extra_columns: true,
        }
    }

    /// Set whether rows longer than the schema are accepted.
    pub fn with_extra_columns(mut self, allow: bool) -> Self {
        self.allow_extra_columns = allow;
        self
    }

    /// Check the header, then every row in order, stopping at the first error.
    ///
    /// The header must equal the canonical header exactly. Each row must have
    /// every schema column, and its gross, net, IVA and IGIC values must be
    /// empty or ASCII digits. The records are handed back unchanged on success.
    pub fn validate(&self, records: RecordSet) -> Result<RecordSet, ValidationError> {
        self.check_header(&records.header)?;

        for (offset, row) in records.rows().enumerate() {
            let line = FIRST_ROW_LINE + offset;
            self.check_shape(&row, line)?;
            check_amounts(&row, line)?;
        }

        debug!("Validated export with {} rows", records.row_count());

        Ok(records)
    }

    fn check_header(&self, header: &str) -> Result<(), ValidationError> {
        let expected = canonical_header();
        if header != expected {
            return Err(ValidationError::InvalidHeader {
                expected: expected.to_string(),
                found: header.to_string(),
            });
        }
        Ok(())
    }

    fn check_shape(&self, row: &Row<'_>, line: usize) -> Result<(), ValidationError> {
        let found = row.column_count();
        let too_short = found < Field::COUNT;
        let too_long = found > Field::COUNT && !self.allow_extra_columns;

        if too_short || too_long {
            return Err(ValidationError::MalformedRow {
                line,
                expected: Field::COUNT,
                found,
            });
        }
        Ok(())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

fn check_amounts(row: &Row<'_>, line: usize) -> Result<(), ValidationError> {
    for field in Field::AMOUNTS {
        let value = row.value_or_empty(field);
        if !is_valid_amount(value) {
            return Err(ValidationError::InvalidAmount {
                line,
                field,
                value: value.to_string(),
            });
        }
    }
    Ok(())
}
