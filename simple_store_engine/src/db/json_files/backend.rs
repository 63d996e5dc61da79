use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use log::*;
use tokio::fs;

use crate::db::traits::{split_prefix, validate_key, StorageError, StoreBackend};

const TEMP_FILE_MARKER: &str = ".tmp-";

#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    root: PathBuf,
}

impl JsonFileBackend {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(key.split('/').fold(self.root.clone(), |path, component| path.join(component)))
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
    let temp_name = format!(".{name}{TEMP_FILE_MARKER}{:016x}", rand::random::<u64>());
    path.with_file_name(temp_name)
}

impl StoreBackend for JsonFileBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read(&path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }

    async fn put(&self, key: &str, data: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| StorageError::io(key, e))?;
        }
        let temp = temp_path_for(&path);
        if let Err(e) = fs::write(&temp, data).await {
            let _ = fs::remove_file(&temp).await;
            return Err(StorageError::io(key, e));
        }
        if let Err(e) = fs::rename(&temp, &path).await {
            warn!("💾️ Could not move {} into place: {e}", temp.display());
            let _ = fs::remove_file(&temp).await;
            return Err(StorageError::io(key, e));
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let (dir, name_prefix) = split_prefix(prefix)?;
        let dir_path = if dir.is_empty() { self.root.clone() } else { self.path_for(dir)? };
        let mut entries = match fs::read_dir(&dir_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::io(prefix, e)),
        };
        let mut keys = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| StorageError::io(prefix, e))? {
            let file_type = entry.file_type().await.map_err(|e| StorageError::io(prefix, e))?;
            if !file_type.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                debug!("💾️ Skipping non UTF-8 file name in {}", dir_path.display());
                continue;
            };
            if name.starts_with('.') || !name.starts_with(name_prefix) {
                continue;
            }
            let key = if dir.is_empty() { name.to_string() } else { format!("{dir}/{name}") };
            keys.push(key);
        }
        Ok(keys)
    }
}
