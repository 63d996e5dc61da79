use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
    #[error("I/O error accessing {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Document {key} is corrupt: {reason}")]
    Corrupt { key: String, reason: String },
    #[error("Could not encode document {key}: {reason}")]
    Encoding { key: String, reason: String },
}

impl StorageError {
    pub fn io<K: Into<String>>(key: K, source: std::io::Error) -> Self {
        Self::Io { key: key.into(), source }
    }
}
