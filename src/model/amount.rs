//! Number formatting for sales values.
//!
//! Tooltips show whole-dollar amounts with thousands separators, e.g. `$1,234,567`. Value axes and
//! callouts use a compact two-significant-digit SI form, e.g. `1.5M`.

use std::fmt;
use std::fmt::{Display, Formatter};

/// A dollar amount that displays as a grouped whole number with a leading dollar sign.
///
/// ```
/// # use sales_deck::model::Amount;
/// assert_eq!(Amount::new(1234567.4).to_string(), "$1,234,567");
/// assert_eq!(Amount::new(-50.0).to_string(), "-$50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Amount(f64);

impl Amount {
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// The compact SI rendering of this amount, without the dollar sign.
    pub fn si(&self) -> String {
        si(self.0)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (sign, num) = if self.0 < 0.0 {
            ("-", -self.0)
        } else {
            ("", self.0)
        };
        let grouped = format_num::format_num!(",.0f", num);
        // Amounts that round to zero should not carry a sign.
        if grouped == "0" {
            return write!(f, "$0");
        }
        write!(f, "{sign}${grouped}")
    }
}

/// Below this the SI formatter runs out of prefixes.
const SI_FLOOR: f64 = 1e-24;

/// Two significant digits with an SI prefix, e.g. `42M`. Values that are not finite, or nonzero
/// but too small to carry a prefix, show as `0`.
pub fn si(value: f64) -> String {
    if !value.is_finite() || (value != 0.0 && value.abs() < SI_FLOOR) {
        return String::from("0");
    }
    format_num::format_num!(".2s", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_grouped() {
        assert_eq!("$1,234,567", Amount::new(1234567.0).to_string());
        assert_eq!("$999", Amount::new(999.0).to_string());
        assert_eq!("$1,000", Amount::new(999.6).to_string());
    }

    #[test]
    fn test_display_zero_and_negative() {
        assert_eq!("$0", Amount::new(0.0).to_string());
        assert_eq!("$0", Amount::new(-0.2).to_string());
        assert_eq!("-$2,500", Amount::new(-2500.0).to_string());
    }

    #[test]
    fn test_si() {
        assert_eq!("42M", si(42e6));
        assert_eq!("42M", Amount::new(42e6).si());
    }

    #[test]
    fn test_si_out_of_range() {
        assert_eq!("0", si(f64::INFINITY));
        assert_eq!("0", si(f64::NEG_INFINITY));
        assert_eq!("0", si(f64::NAN));
        assert_eq!("0", si(1e-30));
        assert_eq!("0", si(-1e-30));
        assert!(!si(0.0).is_empty());
        assert!(!si(1e300).is_empty());
    }
}
