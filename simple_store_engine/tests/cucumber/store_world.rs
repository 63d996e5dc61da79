use std::sync::Arc;

use cucumber::World;
use log::*;
use simple_store_engine::{
    db_types::{Order, OrderId},
    JsonFileBackend,
    PaymentProviders,
    PlaceOrderOutcome,
    Reply,
    Store,
    StoreConfig,
};
use tempfile::TempDir;

use crate::support::{catalog, user, RecordingRenderer};

#[derive(Default, Debug, World)]
pub struct StoreWorld {
    pub system: Option<StoreSystem>,
}

pub struct StoreSystem {
    pub dir: TempDir,
    pub config: StoreConfig,
    pub providers: PaymentProviders,
    store: Option<Store<JsonFileBackend>>,
    pub last_reply: Option<Reply>,
    pub last_outcome: Option<PlaceOrderOutcome>,
}

impl std::fmt::Debug for StoreSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StoreSystem({})", self.dir.path().display())
    }
}

impl StoreWorld {
    pub fn system(&mut self) -> &mut StoreSystem {
        self.system.as_mut().expect("Store not initialised")
    }

    pub fn store(&mut self) -> &Store<JsonFileBackend> {
        self.system().store()
    }
}

impl StoreSystem {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Error creating store directory");
        debug!("Created store directory: {}", dir.path().display());
        Self {
            dir,
            config: StoreConfig::default(),
            providers: PaymentProviders::default(),
            store: None,
            last_reply: None,
            last_outcome: None,
        }
    }

    /// Configuration changes only take effect on the next store instance. The documents on disk are kept.
    pub fn restart(&mut self) {
        self.store = None;
    }

    pub fn store(&mut self) -> &Store<JsonFileBackend> {
        self.store.get_or_insert_with(|| {
            let backend = JsonFileBackend::new(self.dir.path());
            Store::new(backend, catalog(), self.config.clone(), Arc::new(RecordingRenderer::default()))
                .with_payment_providers(self.providers.clone())
        })
    }

    pub async fn order(&mut self, who: &str, id: u64) -> Order {
        let orders = self.store().orders(&user(who)).await.expect("Error fetching orders");
        orders.into_iter().find(|o| o.id == OrderId(id)).unwrap_or_else(|| panic!("{who} has no order #{id}"))
    }
}
