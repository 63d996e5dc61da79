//! Typed JSON documents on top of a [`StoreBackend`].
use log::*;
use serde::{de::DeserializeOwned, Serialize};

use crate::db::{
    file_pattern::DecimalFilePattern,
    traits::{StorageError, StoreBackend},
};

#[derive(Debug, Clone)]
pub struct Documents<B> {
    backend: B,
}

impl<B> Documents<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B> Documents<B>
where B: StoreBackend
{
    /// Reads and decodes the document at `key`. A missing document is `Ok(None)`.
    pub async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(data) = self.backend.get(key).await? else {
            trace!("💾️ {key} does not exist");
            return Ok(None);
        };
        serde_json::from_slice(&data)
            .map(Some)
            .map_err(|e| StorageError::Corrupt { key: key.to_string(), reason: e.to_string() })
    }

    pub async fn write<T: Serialize>(&self, key: &str, doc: &T) -> Result<(), StorageError> {
        let data = serde_json::to_vec_pretty(doc)
            .map_err(|e| StorageError::Encoding { key: key.to_string(), reason: e.to_string() })?;
        self.backend.put(key, &data).await?;
        trace!("💾️ Wrote {} bytes to {key}", data.len());
        Ok(())
    }

    pub async fn remove_if_exists(&self, key: &str) -> Result<bool, StorageError> {
        let removed = self.backend.delete(key).await?;
        trace!("💾️ Remove {key}: {}", if removed { "removed" } else { "did not exist" });
        Ok(removed)
    }

    pub async fn keys(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        self.backend.list(prefix).await
    }

    /// The highest sequence number of the documents in `dir` that match `pattern`, or zero if there are none.
    pub async fn last_sequence(&self, dir: &str, pattern: &DecimalFilePattern) -> Result<u64, StorageError> {
        let prefix = format!("{dir}/{}", pattern.prefix());
        let keys = self.backend.list(&prefix).await?;
        Ok(pattern.last(keys.iter().map(String::as_str)).unwrap_or(0))
    }
}
