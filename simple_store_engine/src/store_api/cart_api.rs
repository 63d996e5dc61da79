use chrono::Utc;
use log::*;

use crate::{
    db::traits::StoreBackend,
    db_types::{Cart, Product, UserId},
    store_api::{
        errors::StoreError,
        render_objects::{AddToCartContext, CartContext},
        router::Reply,
        store::{cart_key, Store},
    },
    traits::templates,
};

impl<B> Store<B>
where B: StoreBackend
{
    /// Returns the user's cart. Users who have never added anything, or whose last cart became an order, get an
    /// empty cart.
    pub async fn cart(&self, user: &UserId) -> Result<Cart, StoreError> {
        let _guard = self.lock().await;
        self.load_cart(user).await
    }

    /// Adds one unit of `sku` to the user's cart and persists the cart.
    ///
    /// Returns the catalog product that was added together with the updated cart. Fails with
    /// [`StoreError::ProductNotFound`] without touching storage if the SKU is not in the catalog.
    pub async fn add_to_cart(&self, user: &UserId, sku: &str) -> Result<(Product, Cart), StoreError> {
        let catalog = self.lock().await;
        let product = catalog.get(sku).cloned().ok_or_else(|| StoreError::ProductNotFound(sku.to_string()))?;
        let mut cart = self.load_cart(user).await?;
        cart.add_product(&product);
        cart.updated = Utc::now();
        self.db.write(&cart_key(user), &cart).await?;
        debug!("🛒️ {user} added {sku} to their cart. It now holds {} line items", cart.items.len());
        Ok((product, cart))
    }

    pub async fn handle_cart(&self, user: &UserId) -> Result<Reply, StoreError> {
        let cart = self.cart(user).await?;
        self.render(templates::CART, &CartContext::new(&cart))
    }

    pub async fn handle_add_to_cart(&self, user: &UserId, sku: &str) -> Result<Reply, StoreError> {
        let (product, cart) = self.add_to_cart(user, sku).await?;
        let context = AddToCartContext { product: &product, cart: CartContext::new(&cart) };
        self.render(templates::ADD_TO_CART, &context)
    }
}
