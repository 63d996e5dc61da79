use thiserror::Error;

use crate::{store_api::exchange_objects::ExchangeRate, traits::ProviderFuture};

#[derive(Debug, Clone, Error)]
pub enum ExchangeRateError {
    #[error("The exchange rate source is unavailable: {0}")]
    SourceUnavailable(String),
    #[error("The exchange rate source returned an invalid rate: {0}")]
    InvalidRate(String),
}

pub trait ExchangeRateProvider: Send + Sync {
    /// Fetch the current price of one settlement coin in the store's base currency.
    fn current_rate(&self) -> ProviderFuture<'_, ExchangeRate, ExchangeRateError>;
}

/// An [`ExchangeRateProvider`] that always quotes the same rate.
#[derive(Debug, Clone, Copy)]
pub struct StaticExchangeRate {
    rate: f64,
}

impl StaticExchangeRate {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }
}

impl ExchangeRateProvider for StaticExchangeRate {
    fn current_rate(&self) -> ProviderFuture<'_, ExchangeRate, ExchangeRateError> {
        let rate = ExchangeRate::new(self.rate, None);
        Box::pin(async move { Ok(rate) })
    }
}
