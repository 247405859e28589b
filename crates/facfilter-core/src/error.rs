//! Error types for the facfilter-core library.

use thiserror::Error;

use crate::schema::Field;

/// Main error type for the facfilter library.
#[derive(Error, Debug)]
pub enum FacfilterError {
    /// The export failed header, row shape or amount validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while validating an export. Validation stops at the first one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The first line is not the canonical column header.
    #[error("invalid header: expected `{expected}`, found `{found}`")]
    InvalidHeader { expected: String, found: String },

    /// An amount column holds something other than ASCII digits.
    #[error("invalid amount at line {line}: {field} = `{value}`")]
    InvalidAmount {
        line: usize,
        field: Field,
        value: String,
    },

    /// A row does not have the expected number of columns.
    #[error("malformed row at line {line}: expected {expected} columns, found {found}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
}

impl ValidationError {
    /// Line number (1-based, header is line 1) the error points at.
    pub fn line(&self) -> usize {
        match self {
            Self::InvalidHeader { .. } => 1,
            Self::InvalidAmount { line, .. } | Self::MalformedRow { line, .. } => *line,
        }
    }
}

/// Result type for the facfilter library.
pub type Result<T> = std::result::Result<T, FacfilterError>;
