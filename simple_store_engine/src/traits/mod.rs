//! # External collaborators
//!
//! The store does not render documents, move money or price the settlement currency itself. Those jobs belong to
//! collaborators supplied by whoever embeds the engine:
//!
//! * [`TemplateRenderer`] turns a named template and a serialized context into the bytes of a reply.
//! * [`ExchangeRateProvider`] quotes the current base-currency price of one settlement coin.
//! * [`OnChainAddressProvider`] hands out a receiving address for a buyer.
//! * [`InvoiceProvider`] issues Lightning invoices.
//!
//! The payment-related traits are object safe, so a store can be configured with any subset of them at runtime.
mod exchange_rates;
mod payment_providers;
mod template_renderer;

pub use exchange_rates::{ExchangeRateError, ExchangeRateProvider, StaticExchangeRate};
pub use payment_providers::{InvoiceProvider, OnChainAddressProvider, PaymentProviderError, ProviderFuture};
pub use template_renderer::{templates, RenderError, TemplateRenderer};
