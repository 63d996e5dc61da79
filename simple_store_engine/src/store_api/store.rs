use std::{fmt::Debug, sync::Arc};

use serde::Serialize;
use store_common::Cents;
use tokio::sync::{Mutex, MutexGuard};

use crate::{
    db::{documents::Documents, file_pattern::ORDER_FILE_PATTERN, traits::StoreBackend},
    db_types::{Cart, OrderId, PayType, UserId},
    events::EventProducers,
    store_api::{
        catalog::Catalog,
        errors::StoreError,
        payment_resolver::{PaymentProviders, PaymentResolver},
        router::Reply,
    },
    traits::{RenderError, TemplateRenderer},
};

pub const CARTS_DIR: &str = "carts";
pub const ORDERS_DIR: &str = "orders";

pub fn cart_key(user: &UserId) -> String {
    format!("{CARTS_DIR}/{user}")
}

pub fn order_dir(user: &UserId) -> String {
    format!("{ORDERS_DIR}/{user}")
}

pub fn order_key(user: &UserId, id: OrderId) -> String {
    format!("{}/{}", order_dir(user), ORDER_FILE_PATTERN.filename_for(id.value()))
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// The settlement channel offered to buyers. `PayType::None` means buyers are contacted with payment details.
    pub pay_type: PayType,
    /// The wallet account on-chain receiving addresses are drawn from.
    pub account: String,
    /// Flat shipping and handling charge added to every order with a positive item total.
    pub ship_charge: Cents,
    /// The store operator. Requests from this user see the admin affordances of the index page.
    pub operator: Option<UserId>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { pay_type: PayType::None, account: "default".to_string(), ship_charge: Cents::default(), operator: None }
    }
}

/// A single store instance.
///
/// The store owns its catalog, configuration and collaborators, and every operation that reads or writes carts or
/// orders runs while holding the store-wide lock. Operations on one store are therefore strictly serialized, across
/// all users. Payment providers are also called with the lock held, so a slow provider stalls the whole store.
pub struct Store<B> {
    pub(crate) db: Documents<B>,
    /// The catalog mutex doubles as the store-wide lock.
    catalog: Mutex<Catalog>,
    pub(crate) config: StoreConfig,
    renderer: Arc<dyn TemplateRenderer>,
    pub(crate) payments: PaymentResolver,
    pub(crate) producers: EventProducers,
}

impl<B> Debug for Store<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Store({:?})", self.config)
    }
}

impl<B> Store<B> {
    pub fn new(db: B, catalog: Catalog, config: StoreConfig, renderer: Arc<dyn TemplateRenderer>) -> Self {
        Self {
            db: Documents::new(db),
            catalog: Mutex::new(catalog),
            config,
            renderer,
            payments: PaymentResolver::default(),
            producers: EventProducers::default(),
        }
    }

    pub fn with_payment_providers(mut self, providers: PaymentProviders) -> Self {
        self.payments = PaymentResolver::new(providers);
        self
    }

    pub fn with_event_producers(mut self, producers: EventProducers) -> Self {
        self.producers = producers;
        self
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn db(&self) -> &B {
        self.db.backend()
    }

    pub fn is_operator(&self, user: &UserId) -> bool {
        self.config.operator.as_ref() == Some(user)
    }

    /// Acquires the store-wide lock.
    pub(crate) async fn lock(&self) -> MutexGuard<'_, Catalog> {
        self.catalog.lock().await
    }

    /// Serializes `context` and renders it with the configured renderer into a successful reply.
    pub(crate) fn render<C: Serialize>(&self, template: &str, context: &C) -> Result<Reply, StoreError> {
        let render_error = |source| StoreError::Render { template: template.to_string(), source };
        let context =
            serde_json::to_value(context).map_err(|e| render_error(RenderError::ExecutionFailed(e.to_string())))?;
        let data = self.renderer.render(template, &context).map_err(render_error)?;
        Ok(Reply::ok(data))
    }
}

impl<B> Store<B>
where B: StoreBackend
{
    /// Loads the user's cart. A user without a cart document has an empty cart. The caller must hold the lock.
    pub(crate) async fn load_cart(&self, user: &UserId) -> Result<Cart, StoreError> {
        Ok(self.db.read::<Cart>(&cart_key(user)).await?.unwrap_or_default())
    }
}
