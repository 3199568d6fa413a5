//! Display formatting for rendered copies of numeric values.
//!
//! Formatters only produce strings. Nothing here parses a string back to a
//! number, so aggregates are always computed on the raw values.

use std::fmt;

/// Whole dollars with thousands separators, e.g. `$61,234` or `$-1,050`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Currency(pub f64);

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.0.is_finite() {
            return write!(f, "${}", self.0);
        }
        let rounded = format!("{:.0}", self.0);
        let (sign, digits) = match rounded.strip_prefix('-') {
            Some(digits) => ("-", digits),
            None => ("", rounded.as_str()),
        };
        write!(f, "${}{}", sign, group_thousands(digits))
    }
}

/// Fixed decimals without separators, e.g. `20.3`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decimal(pub f64, pub usize);

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.*}", self.1, self.0)
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(Currency(61234.4).to_string(), "$61,234");
        assert_eq!(Currency(1234567.0).to_string(), "$1,234,567");
        assert_eq!(Currency(999.6).to_string(), "$1,000");
        assert_eq!(Currency(12.0).to_string(), "$12");
        assert_eq!(Currency(-1050.2).to_string(), "$-1,050");
        assert_eq!(Currency(-1234567.0).to_string(), "$-1,234,567");
    }

    #[test]
    fn currency_is_idempotent_and_leaves_value_alone() {
        let raw = 60123.987;
        let value = Currency(raw);
        let first = value.to_string();
        let second = value.to_string();
        assert_eq!(first, second);
        assert_eq!(value.0, raw);
    }

    #[test]
    fn decimal_uses_precision() {
        assert_eq!(Decimal(20.349, 1).to_string(), "20.3");
        assert_eq!(Decimal(f64::NAN, 1).to_string(), "NaN");
    }
}
