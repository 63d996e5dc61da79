use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use store_common::{Atoms, Cents, ATOMS_PER_COIN, BASE_CURRENCY_CODE, SETTLEMENT_CURRENCY_CODE};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// The price of one settlement coin, in units (not cents) of the base currency.
    pub rate: f64,
    pub updated_at: DateTime<Utc>,
}

impl ExchangeRate {
    pub fn new(rate: f64, updated_at: Option<DateTime<Utc>>) -> Self {
        let updated_at = updated_at.unwrap_or_else(Utc::now);
        Self { rate, updated_at }
    }

    /// A rate is only usable if it is a finite, strictly positive number.
    pub fn is_valid(&self) -> bool {
        self.rate.is_finite() && self.rate > 0.0
    }

    /// Convert an amount in base currency cents to the settlement currency, rounded to the nearest atom.
    ///
    /// Returns zero if the rate is not valid.
    pub fn convert_cents(&self, amount: Cents) -> Atoms {
        if !self.is_valid() {
            return Atoms::default();
        }
        let coins = amount.as_dollars() / self.rate;
        #[allow(clippy::cast_possible_truncation)]
        Atoms::from((coins * ATOMS_PER_COIN as f64).round() as i64)
    }
}

impl Display for ExchangeRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} {BASE_CURRENCY_CODE}/{SETTLEMENT_CURRENCY_CODE}", self.rate)
    }
}
