// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Fixed-point decimal value.

use core::fmt;
use core::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::config::{VALUE_DECIMALS, VALUE_SCALE};

/// Signed fixed-point quantity with `VALUE_DECIMALS` fractional digits,
/// stored as raw base units.
///
/// Negative values exist so that a malformed output can be represented and
/// rejected. Arithmetic is checked; callers turn `None` into an overflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Amount(pub i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);
    pub const ONE: Amount = Amount(VALUE_SCALE);

    /// Whole coins to base units. `None` if the result does not fit.
    pub fn from_coins(coins: i64) -> Option<Self> {
        coins.checked_mul(VALUE_SCALE).map(Amount)
    }

    pub const fn from_units(units: i64) -> Self {
        Amount(units)
    }

    pub const fn units(self) -> i64 {
        self.0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    pub fn checked_sub(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_sub(rhs.0).map(Amount)
    }

    /// Sums values, `None` on overflow.
    pub fn checked_sum<I: IntoIterator<Item = Amount>>(values: I) -> Option<Amount> {
        values
            .into_iter()
            .try_fold(Amount::ZERO, |acc, v| acc.checked_add(v))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = VALUE_SCALE as u64;
        let whole = abs / scale;
        let frac = abs % scale;
        if frac == 0 {
            return write!(f, "{sign}{whole}");
        }
        let digits = format!("{:0width$}", frac, width = VALUE_DECIMALS as usize);
        write!(f, "{sign}{whole}.{}", digits.trim_end_matches('0'))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid amount {0:?}")]
pub struct ParseAmountError(pub String);

impl FromStr for Amount {
    type Err = ParseAmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseAmountError(s.to_string());
        let text = s.trim();
        let (negative, body) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let (whole, frac) = body.split_once('.').unwrap_or((body, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(err());
        }
        if frac.len() > VALUE_DECIMALS as usize
            || !whole.chars().all(|c| c.is_ascii_digit())
            || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(err());
        }

        let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().map_err(|_| err())? };
        let frac_units: i64 = if frac.is_empty() {
            0
        } else {
            let padded = format!("{:0<width$}", frac, width = VALUE_DECIMALS as usize);
            padded.parse().map_err(|_| err())?
        };

        let units = whole
            .checked_mul(VALUE_SCALE)
            .and_then(|w| w.checked_add(frac_units))
            .ok_or_else(err)?;
        Ok(Amount(if negative { -units } else { units }))
    }
}

// Human-readable formats carry the decimal text, binary formats the raw units.
impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            serializer.serialize_i64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AmountVisitor;

        impl<'de> Visitor<'de> for AmountVisitor {
            type Value = Amount;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a decimal amount")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
                Ok(Amount(v))
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_str(AmountVisitor)
        } else {
            deserializer.deserialize_i64(AmountVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        let a: Amount = "10.5".parse().unwrap();
        assert_eq!(a.units(), 1_050_000_000);
        assert_eq!(a.to_string(), "10.5");

        let b: Amount = "-0.00000001".parse().unwrap();
        assert_eq!(b.units(), -1);
        assert_eq!(b.to_string(), "-0.00000001");

        assert_eq!(Amount::from_coins(7).unwrap().to_string(), "7");
        assert_eq!(".25".parse::<Amount>().unwrap(), Amount(25_000_000));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Amount>().is_err());
        assert!("1.123456789".parse::<Amount>().is_err());
        assert!("1e5".parse::<Amount>().is_err());
        assert!("--1".parse::<Amount>().is_err());
        assert!("99999999999999999999".parse::<Amount>().is_err());
    }

    #[test]
    fn test_checked_sum_overflow() {
        assert_eq!(Amount::checked_sum([Amount(1), Amount(2)]), Some(Amount(3)));
        assert_eq!(Amount::checked_sum([Amount(i64::MAX), Amount(1)]), None);
        assert_eq!(Amount::checked_sum([]), Some(Amount::ZERO));
    }

    #[test]
    fn test_json_uses_decimal_text() {
        let json = serde_json::to_string(&Amount(150_000_000)).unwrap();
        assert_eq!(json, "\"1.5\"");
        let back: Amount = serde_json::from_str("\"1.5\"").unwrap();
        assert_eq!(back, Amount(150_000_000));
        assert!(serde_json::from_str::<Amount>("\"1.5.0\"").is_err());
    }
}
