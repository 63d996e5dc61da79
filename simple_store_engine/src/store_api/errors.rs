use thiserror::Error;

use crate::{
    db::traits::StorageError,
    db_types::InvalidUserId,
    traits::RenderError,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("product does not exist: {0}")]
    ProductNotFound(String),
    #[error("Persistence error: {0}")]
    Storage(#[from] StorageError),
    #[error("unable to execute {template} template: {source}")]
    Render {
        template: String,
        #[source]
        source: RenderError,
    },
    #[error(transparent)]
    InvalidUser(#[from] InvalidUserId),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Could not read the catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("The catalog file is not valid: {0}")]
    Format(#[from] serde_json::Error),
    #[error("The catalog contains SKU {0} more than once")]
    DuplicateSku(String),
    #[error("Product {0} has an empty SKU or a price outside $0 to $1,000,000")]
    InvalidProduct(String),
}
