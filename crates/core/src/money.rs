//! Money amounts.

use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A monetary amount in the voucher's currency.
///
/// Backed by a decimal so that column totals and the balance tolerance are
/// compared exactly. Serialized as a JSON number.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Largest amount accepted from user input (10^15). Keeps column sums
    /// far below the `Decimal` range.
    pub const MAX_INPUT: Amount = Amount(Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0));

    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Whole currency units, e.g. `Amount::from_units(100_000)`.
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// `units` scaled down by `10^scale`, e.g. `(1, 2)` is `0.01`.
    pub fn from_scaled(units: i64, scale: u32) -> Self {
        Self(Decimal::new(units, scale))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Strict parse of user-typed text.
    ///
    /// Accepts `.` or `,` as decimal separator and strips grouping
    /// separators, blanks, `_` and a leading `$`. A single separator
    /// followed by exactly three digits is grouping (`100.000` is one
    /// hundred thousand). Negative values and values above
    /// [`MAX_INPUT`](Self::MAX_INPUT) are rejected.
    pub fn parse(text: &str) -> DomainResult<Self> {
        let normalized = normalize(text)
            .ok_or_else(|| DomainError::invalid_amount(text))?;
        let value = Decimal::from_str(&normalized).map_err(|_| DomainError::invalid_amount(text))?;
        if value.is_sign_negative() && !value.is_zero() {
            return Err(DomainError::NegativeAmount { input: text.to_string() });
        }
        if value > Self::MAX_INPUT.0 {
            return Err(DomainError::AmountTooLarge { input: text.to_string() });
        }
        Ok(Self(value.normalize()))
    }

    /// Lenient parse used for live totals: anything unparseable is zero.
    pub fn parse_or_zero(text: &str) -> Self {
        Self::parse(text).unwrap_or(Self::ZERO)
    }
}

fn normalize(text: &str) -> Option<String> {
    let cleaned: String = text
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let last_dot = cleaned.rfind('.');
    let last_comma = cleaned.rfind(',');
    let out = match (last_dot, last_comma) {
        (Some(dot), Some(comma)) => {
            // The right-most separator is the decimal one.
            let (decimal, grouping) = if dot > comma { ('.', ',') } else { (',', '.') };
            cleaned
                .chars()
                .filter(|c| *c != grouping)
                .map(|c| if c == decimal { '.' } else { c })
                .collect()
        }
        (None, Some(_)) => single_separator(&cleaned, ','),
        (Some(_), None) => single_separator(&cleaned, '.'),
        _ => cleaned,
    };
    Some(out)
}

/// Only one kind of separator is present: repeated, or followed by exactly
/// three digits after a short non-zero head, it groups thousands;
/// otherwise it is the decimal point.
fn single_separator(cleaned: &str, sep: char) -> String {
    let count = cleaned.matches(sep).count();
    let (head, tail) = cleaned.rsplit_once(sep).unwrap_or((cleaned, ""));
    let groups_thousands = count > 1
        || (tail.len() == 3 && (1..=3).contains(&head.len()) && !head.starts_with('0'));
    if groups_thousands {
        cleaned.replace(sep, "")
    } else {
        cleaned.replace(sep, ".")
    }
}

impl core::fmt::Display for Amount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Amount {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_plain_and_decimal_input() {
        assert_eq!(Amount::parse("100000").unwrap(), Amount::from_units(100_000));
        assert_eq!(Amount::parse("0.5").unwrap(), Amount::from_scaled(5, 1));
        assert_eq!(Amount::parse("1,5").unwrap(), Amount::from_scaled(15, 1));
    }

    #[test]
    fn strips_grouping_separators() {
        assert_eq!(Amount::parse("100.000,50").unwrap(), Amount::from_scaled(10_000_050, 2));
        assert_eq!(Amount::parse("100,000.50").unwrap(), Amount::from_scaled(10_000_050, 2));
        assert_eq!(Amount::parse("1.000.000").unwrap(), Amount::from_units(1_000_000));
        assert_eq!(Amount::parse("100,000").unwrap(), Amount::from_units(100_000));
        assert_eq!(Amount::parse("100.000").unwrap(), Amount::from_units(100_000));
        assert_eq!(Amount::parse("1.500").unwrap(), Amount::from_units(1_500));
        assert_eq!(Amount::parse("0.500").unwrap(), Amount::from_scaled(5, 1));
        assert_eq!(Amount::parse("1234,567").unwrap(), Amount::from_scaled(1_234_567, 3));
        assert_eq!(Amount::parse("0,5").unwrap(), Amount::from_scaled(5, 1));
        assert_eq!(Amount::parse("$ 1 200").unwrap(), Amount::from_units(1_200));
    }

    #[test]
    fn rejects_garbage_and_negatives() {
        assert!(Amount::parse("").is_err());
        assert!(Amount::parse("abc").is_err());
        assert_eq!(
            Amount::parse("-5"),
            Err(DomainError::NegativeAmount { input: "-5".to_string() })
        );
        assert_eq!(Amount::parse_or_zero("12a"), Amount::ZERO);
        assert_eq!(Amount::parse_or_zero("-3"), Amount::ZERO);
    }

    #[test]
    fn rejects_amounts_above_the_input_ceiling() {
        assert_eq!(Amount::MAX_INPUT, Amount::from_units(1_000_000_000_000_000));
        assert!(Amount::parse("1000000000000000").is_ok());
        assert_eq!(
            Amount::parse("79228162514264337593543950335"),
            Err(DomainError::AmountTooLarge { input: "79228162514264337593543950335".to_string() })
        );
        assert_eq!(Amount::parse_or_zero("1000000000000000.01"), Amount::ZERO);
    }

    #[test]
    fn checked_arithmetic_reports_overflow() {
        let max = Amount::new(Decimal::MAX);
        assert_eq!(max.checked_add(Amount::from_units(1)), None);
        assert_eq!(Amount::from_units(2).checked_add(Amount::from_units(3)), Some(Amount::from_units(5)));
        assert_eq!(Amount::new(Decimal::MIN).checked_sub(Amount::from_units(1)), None);
    }

    #[test]
    fn displays_two_decimals() {
        assert_eq!(Amount::from_units(60_000).to_string(), "60000.00");
    }

    #[test]
    fn serializes_as_number() {
        let json = serde_json::to_value(Amount::from_scaled(1_050, 2)).unwrap();
        assert_eq!(json.as_f64(), Some(10.5));
    }

    proptest! {
        #[test]
        fn whole_numbers_parse_to_themselves(n in 0i64..1_000_000_000i64) {
            prop_assert_eq!(Amount::parse(&n.to_string()).unwrap(), Amount::from_units(n));
        }
    }
}
