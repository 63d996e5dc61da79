use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::db::traits::{split_prefix, validate_key, StorageError, StoreBackend};

/// A [`StoreBackend`] that keeps documents in memory. Clones share the same documents.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    docs: Arc<Mutex<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.docs().len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs().is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.docs().contains_key(key)
    }

    fn docs(&self) -> MutexGuard<'_, BTreeMap<String, Vec<u8>>> {
        // A panic while holding the guard cannot leave the map half-updated, so a poisoned lock is still usable
        self.docs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl StoreBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        validate_key(key)?;
        Ok(self.docs().get(key).cloned())
    }

    async fn put(&self, key: &str, data: &[u8]) -> Result<(), StorageError> {
        validate_key(key)?;
        self.docs().insert(key.to_string(), data.to_vec());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        validate_key(key)?;
        Ok(self.docs().remove(key).is_some())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let (dir, name_prefix) = split_prefix(prefix)?;
        let docs = self.docs();
        let keys = docs
            .keys()
            .filter(|key| {
                let (key_dir, name) = match key.rfind('/') {
                    Some(i) => (&key[..i], &key[i + 1..]),
                    None => ("", key.as_str()),
                };
                key_dir == dir && name.starts_with(name_prefix)
            })
            .cloned()
            .collect();
        Ok(keys)
    }
}
