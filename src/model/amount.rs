//! Amount type for handling monetary values typed by a user.
//!
//! This module provides the `Amount` type which wraps `Decimal` and handles parsing values that
//! may or may not include a leading currency symbol and thousands separators.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Represents a money value.
///
/// In JSON an `Amount` is a plain number, which is how the dashboard has always stored balances
/// and transaction amounts.
///
/// # Examples
///
/// ```
/// # use daybook::model::Amount;
/// # use std::str::FromStr;
/// let a = Amount::from_str("₹1,250.50").unwrap();
/// let b = Amount::from_str("1250.5").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "1,250.50");
/// assert_eq!(a.with_symbol("₹"), "₹1,250.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    value: Decimal,
}

impl Amount {
    pub const ZERO: Amount = Amount::new(Decimal::ZERO);

    /// 10^28, the largest total an account may carry. Amounts are stored as JSON numbers, and
    /// totals near `Decimal::MAX` do not survive the trip.
    pub const LIMIT: Amount =
        Amount::new(Decimal::from_parts(268_435_456, 1_042_612_833, 542_101_086, false, 0));

    /// Creates a new Amount from a Decimal value.
    pub const fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.value().is_zero()
    }

    /// Returns true if the amount is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.value().is_sign_positive()
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.value().is_sign_negative()
    }

    /// The magnitude of the amount.
    pub fn abs(&self) -> Amount {
        Amount::new(self.value.abs())
    }

    /// `None` when the sum is too large to represent.
    pub fn checked_add(&self, rhs: Amount) -> Option<Amount> {
        self.value.checked_add(rhs.value).map(Amount::new)
    }

    pub fn checked_sub(&self, rhs: Amount) -> Option<Amount> {
        self.value.checked_sub(rhs.value).map(Amount::new)
    }

    /// Lossy conversion for drawing.
    pub fn to_f64(&self) -> f64 {
        self.value.to_f64().unwrap_or_default()
    }

    /// Formats with thousands separators and the given currency symbol, e.g. `-₹60,000.00`.
    pub fn with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let num = self.value.abs().to_f64().unwrap_or_default();
        format!("{sign}{symbol}{}", format_num::format_num!(",.2", num))
    }
}

/// An error that can occur when parsing strings into `Amount` values.
pub struct AmountError(rust_decimal::Error);

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, trimmed),
        };

        // Drop a leading currency symbol such as `$`, `₹` or `€`.
        let digits = unsigned.trim_start_matches(|c: char| {
            !(c.is_ascii_digit() || c == '.' || c == '-' || c.is_whitespace())
        });

        // Remove commas (thousand separators)
        let without_commas = digits.trim().replace(',', "");

        let value = Decimal::from_str(&without_commas).map_err(AmountError)?;
        Ok(Amount::new(if negative { -value } else { value }))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.with_symbol(""))
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        rust_decimal::serde::float::serialize(&self.value, serializer)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        rust_decimal::serde::float::deserialize(deserializer).map(Amount::new)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount::new(Decimal::from(value))
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

impl std::ops::Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Amount::new(self.value + rhs.value)
    }
}

impl std::ops::Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount::new(self.value - rhs.value)
    }
}

impl std::ops::AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.value += rhs.value;
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, |acc, a| acc + a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_plain() {
        let amount = Amount::from_str("50.00").unwrap();
        assert_eq!(amount.value(), dec("50.00"));
    }

    #[test]
    fn test_parse_with_symbol_and_commas() {
        assert_eq!(Amount::from_str("$1,000.00").unwrap().value(), dec("1000"));
        assert_eq!(Amount::from_str("₹1,23,456.5").unwrap().value(), dec("123456.5"));
    }

    #[test]
    fn test_parse_negative_with_symbol() {
        let amount = Amount::from_str("-₹50").unwrap();
        assert_eq!(amount.value(), dec("-50"));
        assert!(amount.is_negative());
    }

    #[test]
    fn test_parse_whitespace() {
        let amount = Amount::from_str("  $50.00  ").unwrap();
        assert_eq!(amount.value(), dec("50.00"));
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!(Amount::from_str("").is_err());
        assert!(Amount::from_str("abc").is_err());
        assert!(Amount::from_str("NaN").is_err());
        assert!(Amount::from_str("12..5").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Amount::from(1000).to_string(), "1,000.00");
        assert_eq!(Amount::from(-50).with_symbol("₹"), "-₹50.00");
        assert_eq!(Amount::ZERO.with_symbol("$"), "$0.00");
    }

    #[test]
    fn test_zero_is_not_positive_or_negative() {
        assert!(!Amount::ZERO.is_positive());
        assert!(!Amount::ZERO.is_negative());
        assert!(Amount::ZERO.is_zero());
    }

    #[test]
    fn test_json_is_a_number() {
        let amount: Amount = serde_json::from_str("12.5").unwrap();
        assert_eq!(amount.value(), dec("12.5"));
        let amount: Amount = serde_json::from_str("200").unwrap();
        assert_eq!(amount.value(), dec("200"));
        assert_eq!(serde_json::to_string(&Amount::from(200)).unwrap(), "200.0");
    }

    #[test]
    fn test_sum() {
        let total: Amount = [Amount::from(1), Amount::from(2), Amount::from(3)]
            .into_iter()
            .sum();
        assert_eq!(total, Amount::from(6));
    }

    #[test]
    fn test_checked_add_overflow() {
        let max = Amount::new(Decimal::MAX);
        assert_eq!(max.checked_add(Amount::from(1)), None);
        assert_eq!(max.checked_sub(Amount::from(1)), Some(Amount::new(Decimal::MAX - Decimal::ONE)));
        assert_eq!(Amount::from(-4).abs(), Amount::from(4));
        assert_eq!(Amount::LIMIT, Amount::from_str("10000000000000000000000000000").unwrap());
    }
}
