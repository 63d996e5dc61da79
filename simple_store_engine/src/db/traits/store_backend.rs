use crate::db::traits::StorageError;

/// This trait defines the behaviour that storage backends need to expose in order to hold store documents.
///
/// Keys are relative, `/`-separated paths such as `carts/alice` or `orders/alice/order-3.json`. Backends must reject
/// keys that fail [`validate_key`].
///
/// Absence is never an error: `get` returns `None`, `delete` returns `false`, and `list` returns an empty vector.
#[allow(async_fn_in_trait)]
pub trait StoreBackend {
    /// Fetches the document stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Stores `data` under `key`, replacing any previous document.
    ///
    /// The replacement must be atomic: a reader sees either the old document or the new one, and a failed write leaves
    /// no partial document behind.
    async fn put(&self, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Removes the document under `key`. Returns `true` if a document was removed.
    async fn delete(&self, key: &str) -> Result<bool, StorageError>;

    /// Lists the keys of the documents that live directly under the "directory" of `prefix` and whose final path
    /// component starts with the remainder of the prefix. `orders/alice/` lists every document in `orders/alice`,
    /// while `orders/alice/order-` only lists those whose name starts with `order-`.
    ///
    /// The listing is not recursive. The order of the returned keys is unspecified.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError>;
}

/// Checks that `key` is a relative path made only of normal components.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let bad_component = |c: &str| c.is_empty() || c == "." || c == "..";
    if key.is_empty() || key.contains('\\') || key.contains('\0') || key.split('/').any(bad_component) {
        return Err(StorageError::InvalidKey(key.escape_default().to_string()));
    }
    Ok(())
}

/// Splits a listing prefix into its directory part (without the trailing slash) and the file-name prefix.
pub(crate) fn split_prefix(prefix: &str) -> Result<(&str, &str), StorageError> {
    let (dir, name_prefix) = match prefix.rfind('/') {
        Some(i) => (&prefix[..i], &prefix[i + 1..]),
        None => ("", prefix),
    };
    if !dir.is_empty() {
        validate_key(dir)?;
    }
    if name_prefix.contains('\\') || name_prefix.contains('\0') {
        return Err(StorageError::InvalidKey(prefix.escape_default().to_string()));
    }
    Ok((dir, name_prefix))
}
