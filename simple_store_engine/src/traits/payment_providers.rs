use std::{future::Future, pin::Pin};

use thiserror::Error;

use crate::db_types::UserId;

/// The boxed future returned by provider calls. Boxing keeps the provider traits object safe.
pub type ProviderFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

#[derive(Debug, Clone, Error)]
pub enum PaymentProviderError {
    #[error("The payment provider is not available: {0}")]
    Unavailable(String),
    #[error("The payment provider rejected the request: {0}")]
    Rejected(String),
}

/// Generates on-chain receiving addresses, typically backed by the store operator's wallet.
pub trait OnChainAddressProvider: Send + Sync {
    /// Returns a fresh receiving address in `account` for payments from `user`.
    fn onchain_address<'a>(
        &'a self,
        user: &'a UserId,
        account: &'a str,
    ) -> ProviderFuture<'a, String, PaymentProviderError>;
}

/// Issues Lightning Network invoices.
pub trait InvoiceProvider: Send + Sync {
    /// Returns an encoded invoice for `milli_atoms`, optionally carrying a description.
    fn invoice(&self, milli_atoms: i64, memo: Option<String>) -> ProviderFuture<'_, String, PaymentProviderError>;
}
