//! Invoice export pipeline: parse, validate, filter.

mod filter;
mod parser;
pub mod rules;
mod validator;

pub use filter::{filter_invoices, InvoiceFilter};
pub use parser::parse;
pub use rules::{ArithmeticMode, Rule, TaxKind};
pub use validator::{validate, Validator};
