//! Amount format checks and gross/net/rate arithmetic.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::patterns::AMOUNT_DIGITS;

/// Arithmetic used to check `gross == net + net * rate / 100`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArithmeticMode {
    /// IEEE 754 doubles compared with exact equality, no tolerance.
    #[default]
    Float,
    /// Exact decimal arithmetic. Differs from `Float` once amounts exceed
    /// 2^53, where doubles can no longer represent every integer.
    Decimal,
}

/// Whether `value` is empty or made only of ASCII digits.
pub fn is_valid_amount(value: &str) -> bool {
    AMOUNT_DIGITS.is_match(value)
}

/// Check that `gross` equals `net` plus `rate` percent of `net`.
///
/// Empty values count as zero. Values that do not parse make the check fail.
pub fn gross_matches(gross: &str, net: &str, rate: &str, mode: ArithmeticMode) -> bool {
    match mode {
        ArithmeticMode::Float => gross_matches_float(gross, net, rate),
        ArithmeticMode::Decimal => gross_matches_decimal(gross, net, rate),
    }
}

fn gross_matches_float(gross: &str, net: &str, rate: &str) -> bool {
    let (Some(gross), Some(net), Some(rate)) = (parse_f64(gross), parse_f64(net), parse_f64(rate))
    else {
        return false;
    };

    gross == net * rate / 100.0 + net
}

fn gross_matches_decimal(gross: &str, net: &str, rate: &str) -> bool {
    let (Some(gross), Some(net), Some(rate)) =
        (parse_decimal(gross), parse_decimal(net), parse_decimal(rate))
    else {
        return false;
    };

    net.checked_mul(rate)
        .and_then(|tax| tax.checked_div(Decimal::ONE_HUNDRED))
        .and_then(|tax| tax.checked_add(net))
        .is_some_and(|expected| expected == gross)
}

fn parse_f64(value: &str) -> Option<f64> {
    if value.is_empty() {
        return Some(0.0);
    }
    value.parse().ok()
}

fn parse_decimal(value: &str) -> Option<Decimal> {
    if value.is_empty() {
        return Some(Decimal::ZERO);
    }
    Decimal::from_str(value).ok()
}
