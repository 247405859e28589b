//! Regex patterns for export field formats.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Unsigned integer literal or nothing: no sign, no decimal point, no grouping.
    pub static ref AMOUNT_DIGITS: Regex = Regex::new(r"^[0-9]*$").unwrap();
}
