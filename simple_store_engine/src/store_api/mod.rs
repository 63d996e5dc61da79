//! # Simple store public API
//!
//! Everything a store does is reached through a [`Store`](store::Store) instance. A store owns its catalog,
//! configuration and collaborators, and a single lock that serializes every operation touching carts or orders.
//!
//! * [`catalog_api`] lists products and renders the index and product pages.
//! * [`cart_api`] reads and updates per-user carts.
//! * [`order_flow_api`] turns carts into orders and lists a user's past orders.
//! * [`router`] maps resource paths onto the handlers above.
//!
//! The other submodules in this module are support types: the catalog, payment resolution, the confirmation message
//! and the contexts passed to the template renderer.
//!
//! # API usage
//!
//! ```rust,ignore
//! use simple_store_engine::{JsonFileBackend, Request, Store, StoreConfig, Catalog};
//! let catalog = Catalog::load("catalog.json").await?;
//! let store = Store::new(JsonFileBackend::new("/var/lib/store"), catalog, StoreConfig::default(), renderer);
//! let reply = store.fetch_resource(&Request::new(user, ["addtocart", "A1"])).await?;
//! ```

pub mod cart_api;
pub mod catalog;
pub mod catalog_api;
pub mod confirmation;
pub mod errors;
pub mod exchange_objects;
pub mod order_flow_api;
pub mod payment_resolver;
pub mod render_objects;
pub mod router;
pub mod store;
