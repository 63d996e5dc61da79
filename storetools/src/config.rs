use std::{env, env::VarError, path::PathBuf, sync::Arc};

use log::*;
use simple_store_engine::{
    db_types::{PayType, UserId},
    traits::StaticExchangeRate,
    PaymentProviders,
    StoreConfig,
};
use store_common::Cents;

const DEFAULT_ROOT: &str = "data/store";
const DEFAULT_ACCOUNT: &str = "default";
const DEFAULT_EVENT_BUFFER: usize = 16;

#[derive(Clone, Debug)]
pub struct ToolConfig {
    /// Directory holding the `carts` and `orders` documents.
    pub root: PathBuf,
    /// JSON file with the product catalog. Defaults to `products.json` in the store root.
    pub catalog: PathBuf,
    pub pay_type: PayType,
    pub account: String,
    pub ship_charge: Cents,
    pub operator: Option<UserId>,
    /// A fixed USD/DCR rate. Without one, orders are placed without a settlement quote.
    pub exchange_rate: Option<f64>,
    pub event_buffer: usize,
}

impl Default for ToolConfig {
    fn default() -> Self {
        let root = PathBuf::from(DEFAULT_ROOT);
        Self {
            catalog: root.join("products.json"),
            root,
            pay_type: PayType::None,
            account: DEFAULT_ACCOUNT.to_string(),
            ship_charge: Cents::default(),
            operator: None,
            exchange_rate: None,
            event_buffer: DEFAULT_EVENT_BUFFER,
        }
    }
}

impl ToolConfig {
    pub fn from_env_or_default() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from a variable lookup. Invalid values are logged and replaced by their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where F: Fn(&str) -> Option<String> {
        let defaults = Self::default();
        let root = lookup("SSTORE_ROOT").map(PathBuf::from).unwrap_or(defaults.root);
        let catalog = lookup("SSTORE_CATALOG").map(PathBuf::from).unwrap_or_else(|| root.join("products.json"));
        let pay_type = lookup("SSTORE_PAY_TYPE")
            .map(|s| {
                s.parse::<PayType>().unwrap_or_else(|e| {
                    error!("🪛️ {s} is not a valid value for SSTORE_PAY_TYPE. {e}. Buyers will be contacted instead.");
                    PayType::None
                })
            })
            .unwrap_or(defaults.pay_type);
        let account = lookup("SSTORE_ACCOUNT").unwrap_or(defaults.account);
        let ship_charge = lookup("SSTORE_SHIP_CHARGE")
            .map(|s| {
                s.parse::<f64>().ok().and_then(|d| Cents::try_from(d).ok()).filter(|c| c.value() >= 0).unwrap_or_else(
                    || {
                        error!("🪛️ {s} is not a valid amount for SSTORE_SHIP_CHARGE. No shipping will be charged.");
                        Cents::default()
                    },
                )
            })
            .unwrap_or(defaults.ship_charge);
        let operator = lookup("SSTORE_OPERATOR_ID")
            .and_then(|s| s.parse::<UserId>().map_err(|e| warn!("🪛️ Ignoring SSTORE_OPERATOR_ID. {e}")).ok());
        let exchange_rate = lookup("SSTORE_EXCHANGE_RATE").and_then(|s| match s.parse::<f64>() {
            Ok(rate) if rate.is_finite() && rate > 0.0 => Some(rate),
            _ => {
                error!("🪛️ {s} is not a valid rate for SSTORE_EXCHANGE_RATE. No quotes will be given.");
                None
            },
        });
        let event_buffer = lookup("SSTORE_EVENT_BUFFER")
            .map(|s| {
                s.parse::<usize>().ok().filter(|n| *n > 0).unwrap_or_else(|| {
                    error!("🪛️ {s} is not a valid SSTORE_EVENT_BUFFER. Using {DEFAULT_EVENT_BUFFER} instead.");
                    DEFAULT_EVENT_BUFFER
                })
            })
            .unwrap_or(defaults.event_buffer);
        if pay_type != PayType::None {
            warn!(
                "🪛️ Pay type {pay_type} is configured, but storetools has no wallet or Lightning node attached. Orders \
                 will be placed without payment instructions."
            );
        }
        Self { root, catalog, pay_type, account, ship_charge, operator, exchange_rate, event_buffer }
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            pay_type: self.pay_type,
            account: self.account.clone(),
            ship_charge: self.ship_charge,
            operator: self.operator.clone(),
        }
    }

    pub fn payment_providers(&self) -> PaymentProviders {
        let mut providers = PaymentProviders::default();
        if let Some(rate) = self.exchange_rate {
            providers.exchange_rates = Some(Arc::new(StaticExchangeRate::new(rate)));
        }
        providers
    }
}

pub fn display_envs() {
    const DISPLAY_ENVS: [&str; 9] = [
        "RUST_LOG",
        "SSTORE_ROOT",
        "SSTORE_CATALOG",
        "SSTORE_PAY_TYPE",
        "SSTORE_ACCOUNT",
        "SSTORE_SHIP_CHARGE",
        "SSTORE_OPERATOR_ID",
        "SSTORE_EXCHANGE_RATE",
        "SSTORE_EVENT_BUFFER",
    ];

    println!("Current environment values:");
    DISPLAY_ENVS.iter().for_each(|&name| {
        let val = match env::var(name) {
            Ok(s) => s,
            Err(VarError::NotPresent) => "Not set".into(),
            Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
        };
        println!("  {name:<35} {val:<15}");
    })
}
