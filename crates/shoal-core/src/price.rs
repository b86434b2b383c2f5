//! Integer-tick price type.
//!
//! The simulated exchange prices every instrument on an integer tick grid,
//! so prices are exact `i64` tick counts. Fractional values (mid-prices,
//! rolling means) live in `rust_decimal::Decimal`; `as_decimal` bridges the
//! two without rounding.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// Price in integer ticks.
///
/// Wraps `i64` to provide type safety and prevent mixing prices
/// with volumes in calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(pub i64);

impl Price {
    pub const ZERO: Self = Self(0);

    #[inline]
    pub fn new(ticks: i64) -> Self {
        Self(ticks)
    }

    #[inline]
    pub fn ticks(&self) -> i64 {
        self.0
    }

    /// Exact decimal representation, for comparison against fair values.
    #[inline]
    pub fn as_decimal(&self) -> Decimal {
        Decimal::from(self.0)
    }

    /// Price shifted by a signed number of ticks.
    #[inline]
    pub fn offset(&self, ticks: i64) -> Self {
        Self(self.0 + ticks)
    }

    /// Signed tick distance from another price.
    #[inline]
    pub fn ticks_from(&self, other: Price) -> i64 {
        self.0 - other.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<i64> for Price {
    fn from(ticks: i64) -> Self {
        Self(ticks)
    }
}

impl Add<i64> for Price {
    type Output = Self;

    fn add(self, rhs: i64) -> Self::Output {
        Self(self.0 + rhs)
    }
}

impl Sub<i64> for Price {
    type Output = Self;

    fn sub(self, rhs: i64) -> Self::Output {
        Self(self.0 - rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_offset() {
        let p = Price::new(10000);
        assert_eq!(p.offset(2), Price::new(10002));
        assert_eq!(p.offset(-2), Price::new(9998));
    }

    #[test]
    fn test_price_ticks_from() {
        let ask = Price::new(2021);
        let bid = Price::new(2019);
        assert_eq!(ask.ticks_from(bid), 2);
        assert_eq!(bid.ticks_from(ask), -2);
    }

    #[test]
    fn test_price_as_decimal() {
        assert_eq!(Price::new(2019).as_decimal(), dec!(2019));
    }

    #[test]
    fn test_price_parse() {
        let p: Price = "9998".parse().unwrap();
        assert_eq!(p, Price::new(9998));
        assert!("abc".parse::<Price>().is_err());
    }

    #[test]
    fn test_price_serde_transparent() {
        let json = serde_json::to_string(&Price::new(42)).unwrap();
        assert_eq!(json, "42");
    }
}
