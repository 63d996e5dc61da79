use std::{fmt::Display, sync::Arc};

use log::*;

use crate::{
    db_types::{Order, PayType},
    store_api::exchange_objects::ExchangeRate,
    traits::{ExchangeRateProvider, InvoiceProvider, OnChainAddressProvider},
};

/// The optional payment collaborators of a store. Any of them may be absent.
#[derive(Clone, Default)]
pub struct PaymentProviders {
    pub exchange_rates: Option<Arc<dyn ExchangeRateProvider>>,
    pub onchain: Option<Arc<dyn OnChainAddressProvider>>,
    pub lightning: Option<Arc<dyn InvoiceProvider>>,
}

impl PaymentProviders {
    pub fn with_exchange_rates<P: ExchangeRateProvider + 'static>(mut self, provider: P) -> Self {
        self.exchange_rates = Some(Arc::new(provider));
        self
    }

    pub fn with_onchain<P: OnChainAddressProvider + 'static>(mut self, provider: P) -> Self {
        self.onchain = Some(Arc::new(provider));
        self
    }

    pub fn with_lightning<P: InvoiceProvider + 'static>(mut self, provider: P) -> Self {
        self.lightning = Some(Arc::new(provider));
        self
    }
}

/// Why no payment instructions could be produced for an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnavailableReason {
    NoRateProvider,
    InvalidRate,
    ZeroTotal,
    AmountOutOfRange,
    AddressFailed(String),
    LightningNotConfigured,
    InvoiceFailed(String),
}

impl Display for UnavailableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoRateProvider => write!(f, "no exchange rate provider is configured"),
            Self::InvalidRate => write!(f, "the exchange rate is missing or not positive"),
            Self::ZeroTotal => write!(f, "the order has a zero settlement total"),
            Self::AmountOutOfRange => write!(f, "the settlement total is too large to invoice"),
            Self::AddressFailed(e) => write!(f, "could not generate an on-chain address: {e}"),
            Self::LightningNotConfigured => write!(f, "no Lightning invoice provider is configured"),
            Self::InvoiceFailed(e) => write!(f, "could not generate a Lightning invoice: {e}"),
        }
    }
}

/// The outcome of payment resolution. Only `OnChain` and `Lightning` change the order itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentResolution {
    Unavailable(UnavailableReason),
    OnChain { address: String },
    Lightning { invoice: String },
    /// No automated settlement channel is configured. The operator contacts the buyer.
    Contact,
}

impl PaymentResolution {
    /// Records the settlement channel and payment target on the order.
    pub fn apply(&self, order: &mut Order) {
        match self {
            Self::OnChain { address } => {
                order.pay_type = PayType::OnChain;
                order.invoice = Some(address.clone());
            },
            Self::Lightning { invoice } => {
                order.pay_type = PayType::LightningNetwork;
                order.invoice = Some(invoice.clone());
            },
            Self::Unavailable(_) | Self::Contact => {},
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Decides how a freshly built order gets paid for.
#[derive(Clone, Default)]
pub struct PaymentResolver {
    providers: PaymentProviders,
}

impl PaymentResolver {
    pub fn new(providers: PaymentProviders) -> Self {
        Self { providers }
    }

    pub fn providers(&self) -> &PaymentProviders {
        &self.providers
    }

    /// Asks the exchange rate provider for a quote. A failing provider is treated like a missing rate.
    pub async fn fetch_rate(&self) -> Option<ExchangeRate> {
        let provider = self.providers.exchange_rates.as_ref()?;
        match provider.current_rate().await {
            Ok(rate) => {
                trace!("💰️ Fetched exchange rate {rate}");
                Some(rate)
            },
            Err(e) => {
                warn!("💰️ Could not fetch the current exchange rate: {e}");
                None
            },
        }
    }

    /// Works out payment instructions for `order`, whose exchange rate must already have been recorded.
    ///
    /// The checks run in a fixed order and the first one that fails decides the outcome. Failures are logged and
    /// never abort order placement.
    pub async fn resolve(&self, pay_type: PayType, account: &str, order: &Order) -> PaymentResolution {
        let resolution = self.select(pay_type, account, order).await;
        if let PaymentResolution::Unavailable(reason) = &resolution {
            match reason {
                UnavailableReason::AddressFailed(_) => {
                    error!("💰️ No payment instructions for order {} from {}: {reason}", order.id, order.user)
                },
                _ => warn!("💰️ No payment instructions for order {} from {}: {reason}", order.id, order.user),
            }
        }
        resolution
    }

    async fn select(&self, pay_type: PayType, account: &str, order: &Order) -> PaymentResolution {
        use PaymentResolution::Unavailable;
        if self.providers.exchange_rates.is_none() {
            return Unavailable(UnavailableReason::NoRateProvider);
        }
        match order.exchange_rate {
            Some(rate) if ExchangeRate::new(rate, None).is_valid() => {},
            _ => return Unavailable(UnavailableReason::InvalidRate),
        }
        let total = order.settlement_total();
        if total.is_zero() {
            return Unavailable(UnavailableReason::ZeroTotal);
        }
        match pay_type {
            PayType::OnChain => {
                let Some(provider) = &self.providers.onchain else {
                    return Unavailable(UnavailableReason::AddressFailed(
                        "no on-chain address provider is configured".to_string(),
                    ));
                };
                match provider.onchain_address(&order.user, account).await {
                    Ok(address) => {
                        debug!("💰️ Generated on-chain address {address} for order {}", order.id);
                        PaymentResolution::OnChain { address }
                    },
                    Err(e) => Unavailable(UnavailableReason::AddressFailed(e.to_string())),
                }
            },
            PayType::LightningNetwork => {
                let Some(provider) = &self.providers.lightning else {
                    return Unavailable(UnavailableReason::LightningNotConfigured);
                };
                let Some(milli_atoms) = total.to_milli_atoms() else {
                    return Unavailable(UnavailableReason::AmountOutOfRange);
                };
                let memo = format!("Order {} from {}", order.id, order.user);
                match provider.invoice(milli_atoms, Some(memo)).await {
                    Ok(invoice) => {
                        debug!("💰️ Generated LN invoice for order {}", order.id);
                        PaymentResolution::Lightning { invoice }
                    },
                    Err(e) => Unavailable(UnavailableReason::InvoiceFailed(e.to_string())),
                }
            },
            PayType::None => PaymentResolution::Contact,
        }
    }
}
