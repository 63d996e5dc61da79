use std::{collections::BTreeMap, path::Path};

use log::*;

use store_common::Cents;

use crate::{db_types::Product, store_api::errors::CatalogError};

/// The most a single product may cost.
pub const MAX_PRICE: Cents = Cents::from_dollars(1_000_000);

/// The products on sale, keyed by SKU. Loaded once when the store starts.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: BTreeMap<String, Product>,
}

impl Catalog {
    pub fn new<I>(products: I) -> Result<Self, CatalogError>
    where I: IntoIterator<Item = Product> {
        let mut map = BTreeMap::new();
        for product in products {
            if product.sku.is_empty() || product.price.value() < 0 || product.price > MAX_PRICE {
                return Err(CatalogError::InvalidProduct(product.title));
            }
            if map.contains_key(&product.sku) {
                return Err(CatalogError::DuplicateSku(product.sku));
            }
            map.insert(product.sku.clone(), product);
        }
        Ok(Self { products: map })
    }

    /// Loads a catalog from a JSON file holding an array of products.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let products: Vec<Product> = serde_json::from_slice(&data)?;
        let catalog = Self::new(products)?;
        info!("🛍️ Loaded {} products from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn get(&self, sku: &str) -> Option<&Product> {
        self.products.get(sku)
    }

    /// All products, in SKU order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
