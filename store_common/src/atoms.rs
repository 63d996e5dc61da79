use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul},
};

use serde::{Deserialize, Serialize};

use crate::op;

pub const SETTLEMENT_CURRENCY_CODE: &str = "DCR";
pub const ATOMS_PER_COIN: i64 = 100_000_000;

//--------------------------------------        Atoms        ---------------------------------------------------------
/// An amount in the settlement currency, in atoms (1e-8 of a coin).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Atoms(i64);

op!(binary Atoms, Add, add);
op!(binary Atoms, Sub, sub);
op!(inplace Atoms, SubAssign, sub_assign);
op!(unary Atoms, Neg, neg);

impl Mul<i64> for Atoms {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self(self.0.saturating_mul(rhs))
    }
}

impl Sum for Atoms {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl From<i64> for Atoms {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Display for Atoms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / ATOMS_PER_COIN as u64;
        let frac = abs % ATOMS_PER_COIN as u64;
        if frac == 0 {
            write!(f, "{sign}{whole} {SETTLEMENT_CURRENCY_CODE}")
        } else {
            let frac = format!("{frac:08}");
            write!(f, "{sign}{whole}.{} {SETTLEMENT_CURRENCY_CODE}", frac.trim_end_matches('0'))
        }
    }
}

impl Atoms {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn from_coins(coins: i64) -> Self {
        Self(coins * ATOMS_PER_COIN)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Lightning invoices are denominated in thousandths of an atom. `None` if the amount does not fit.
    pub fn to_milli_atoms(&self) -> Option<i64> {
        self.0.checked_mul(1000)
    }
}
