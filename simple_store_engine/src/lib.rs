//! Simple Store Engine
//!
//! A small order-processing store reached through a resource-fetch protocol. Remote users browse a fixed product
//! catalog, keep a per-user cart, place orders from the cart and list their past orders. Each reply is a rendered
//! document produced by an external template renderer.
//!
//! The library is divided into these sections:
//! 1. Document storage ([`mod@db`]). Carts and orders are JSON documents behind the [`StoreBackend`] trait. A
//!    directory-backed implementation and an in-memory one are provided.
//! 2. The store public API ([`mod@store_api`]). This provides the catalog, cart, order and routing operations of a
//!    [`Store`].
//! 3. The collaborator traits ([`mod@traits`]) for template rendering, exchange rates and payment providers.
//!
//! The engine also emits an `OrderPlacedEvent` for every placed order. Subscribe to it with the hooks in
//! [`mod@events`].
pub mod db;

pub mod db_types;
pub mod events;
pub mod store_api;
pub mod traits;

pub use db::{
    json_files::JsonFileBackend,
    memory::MemoryBackend,
    traits::{StorageError, StoreBackend},
};
pub use store_api::{
    catalog::Catalog,
    errors::{CatalogError, StoreError},
    exchange_objects::ExchangeRate,
    order_flow_api::{PlaceOrderOutcome, EMPTY_ORDER_REPLY},
    payment_resolver::{PaymentProviders, PaymentResolution, PaymentResolver, UnavailableReason},
    router::{Reply, Request, Resource, ResourceStatus},
    store::{Store, StoreConfig},
};
