//! Interface contracts for storage backends.
//!
//! * [`StoreBackend`] is the byte-level document store every backend must implement.
//! * [`StorageError`] is the error type shared by all backends and by the typed document layer.
mod errors;
mod store_backend;

pub use errors::StorageError;
pub(crate) use store_backend::split_prefix;
pub use store_backend::{validate_key, StoreBackend};
