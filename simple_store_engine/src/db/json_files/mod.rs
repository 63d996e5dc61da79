//! File-per-document storage.
//!
//! Each key maps to a file under the backend's root directory (`carts/alice` → `<root>/carts/alice`). Writes go to a
//! hidden temporary file in the same directory which is then renamed over the target, so a crash mid-write never
//! leaves a truncated document behind.
mod backend;

pub use backend::JsonFileBackend;
