use log::*;

use crate::{
    db::traits::StoreBackend,
    db_types::{Product, UserId},
    store_api::{errors::StoreError, render_objects::IndexContext, router::Reply, store::Store},
    traits::templates,
};

impl<B> Store<B>
where B: StoreBackend
{
    /// All catalog products, ordered by SKU.
    pub async fn products(&self) -> Vec<Product> {
        let catalog = self.lock().await;
        catalog.products().cloned().collect()
    }

    pub async fn product(&self, sku: &str) -> Option<Product> {
        let catalog = self.lock().await;
        catalog.get(sku).cloned()
    }

    pub async fn handle_index(&self, user: &UserId) -> Result<Reply, StoreError> {
        let catalog = self.lock().await;
        let context = IndexContext { products: catalog.products().collect(), is_admin: self.is_operator(user) };
        self.render(templates::INDEX, &context)
    }

    /// Renders a product page. Unknown SKUs get a not-found reply rather than an error.
    pub async fn handle_product(&self, sku: &str) -> Result<Reply, StoreError> {
        match self.product(sku).await {
            Some(product) => self.render(templates::PRODUCT, &product),
            None => {
                debug!("🛍️ Product {sku} was requested but is not in the catalog");
                Ok(self.handle_not_found())
            },
        }
    }
}
