//! Core library for invoice export filtering.
//!
//! This crate provides:
//! - A fixed invoice column schema and positional field lookup
//! - Parsing of newline/comma delimited exports into a [`RecordSet`]
//! - Fail-fast validation of the header and the numeric amount columns
//! - Row-level business rules (unique invoice number, single tax code,
//!   single customer identifier, IVA/IGIC arithmetic) and a filter report

pub mod error;
pub mod invoice;
pub mod models;
pub mod report;
pub mod schema;

pub use error::{FacfilterError, Result, ValidationError};
pub use invoice::{
    filter_invoices, parse, validate, ArithmeticMode, InvoiceFilter, Rule, TaxKind, Validator,
};
pub use models::config::FacfilterConfig;
pub use models::record_set::{RecordSet, Row};
pub use report::{FilterReport, RejectedRow};
pub use schema::{canonical_header, Field, FIELD_SEPARATOR, LINE_SEPARATOR};

/// Run the whole pipeline with default settings: parse, validate, filter, and
/// reassemble the surviving rows as text.
pub fn process(raw: &str) -> Result<String> {
    let (output, _) = process_with(raw, &FacfilterConfig::default())?;
    Ok(output)
}

/// Run the whole pipeline with an explicit configuration, also returning the
/// report of dropped rows.
pub fn process_with(raw: &str, config: &FacfilterConfig) -> Result<(String, FilterReport)> {
    let input = if config.input.trim_trailing_newline {
        raw.strip_suffix(LINE_SEPARATOR).unwrap_or(raw)
    } else {
        raw
    };

    let records = Validator::new()
        .with_extra_columns(config.validation.allow_extra_columns)
        .validate(parse(input))?;

    let (filtered, report) = InvoiceFilter::new()
        .with_arithmetic(config.filter.arithmetic)
        .filter_with_report(&records);

    let mut output = filtered.to_string();
    if config.output.append_trailing_newline {
        output.push(LINE_SEPARATOR);
    }

    Ok((output, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_process_keeps_valid_export() {
        let input = format!(
            "{}\n1,02/05/2019,1200,1000,20,,ACERLaptop,B76430134,",
            canonical_header()
        );
        assert_eq!(process(&input).unwrap(), input);
    }

    #[test]
    fn test_process_with_trims_trailing_newline() {
        let body = format!(
            "{}\n1,02/05/2019,1200,1000,20,,ACERLaptop,B76430134,",
            canonical_header()
        );
        let input = format!("{}\n", body);

        let mut config = FacfilterConfig::default();
        assert!(matches!(
            process_with(&input, &config),
            Err(FacfilterError::Validation(ValidationError::MalformedRow { .. }))
        ));

        config.input.trim_trailing_newline = true;
        config.output.append_trailing_newline = true;
        let (output, report) = process_with(&input, &config).unwrap();
        assert_eq!(output, input);
        assert_eq!(report.kept_rows, 1);
    }
}
