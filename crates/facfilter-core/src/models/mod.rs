//! Data models for invoice exports.

pub mod config;
pub mod record_set;

pub use config::FacfilterConfig;
pub use record_set::{RecordSet, Row};
