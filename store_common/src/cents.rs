use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Mul},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::op;

pub const BASE_CURRENCY_CODE: &str = "USD";

//--------------------------------------        Cents        ---------------------------------------------------------
/// An amount in the store's base currency, held as an integer number of cents so that order totals never drift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(i64);

op!(binary Cents, Sub, sub);
op!(inplace Cents, SubAssign, sub_assign);
op!(unary Cents, Neg, neg);

// Additive operations saturate at the i64 bounds
impl Add for Cents {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Cents {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Mul<i64> for Cents {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self(self.0.saturating_mul(rhs))
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented in cents: {0}")]
pub struct CentsConversionError(String);

impl From<i64> for Cents {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl TryFrom<f64> for Cents {
    type Error = CentsConversionError;

    /// Converts a decimal dollar amount, rounding to the nearest cent.
    fn try_from(dollars: f64) -> Result<Self, Self::Error> {
        let cents = (dollars * 100.0).round();
        if !cents.is_finite() || cents.abs() > i64::MAX as f64 {
            return Err(CentsConversionError(format!("{dollars} is not a valid dollar amount")));
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(Self(cents as i64))
    }
}

impl Display for Cents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}

impl Cents {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub const fn from_dollars(dollars: i64) -> Self {
        Self(dollars.saturating_mul(100))
    }

    pub fn as_dollars(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

/// Serde adapter that stores [`Cents`] as a decimal number of dollars, e.g. `9.99`.
///
/// Use with `#[serde(with = "store_common::cents_as_dollars")]`.
pub mod cents_as_dollars {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    use super::Cents;

    pub fn serialize<S>(value: &Cents, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer {
        serializer.serialize_f64(value.as_dollars())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Cents, D::Error>
    where D: Deserializer<'de> {
        let dollars = f64::deserialize(deserializer)?;
        Cents::try_from(dollars).map_err(D::Error::custom)
    }
}
