//! # Persistence
//!
//! Carts and orders are stored as individual JSON documents. The engine never touches files directly; it goes through
//! a [`StoreBackend`](traits::StoreBackend), which only knows how to get, put, delete and list opaque byte documents by
//! key. Typed access, sequence scans and "absent means default" handling live in [`documents`].
//!
//! Two backends are provided:
//! * [`json_files::JsonFileBackend`] stores one file per key under a root directory, replacing files atomically.
//! * [`memory::MemoryBackend`] keeps everything in a shared in-memory map.
pub mod documents;
pub mod file_pattern;
pub mod json_files;
pub mod memory;
pub mod traits;
