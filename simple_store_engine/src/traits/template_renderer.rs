use thiserror::Error;

/// Names of the templates the store asks a [`TemplateRenderer`] to render.
pub mod templates {
    pub const INDEX: &str = "index.tmpl";
    pub const PRODUCT: &str = "product.tmpl";
    pub const ADD_TO_CART: &str = "addtocart.tmpl";
    pub const CART: &str = "cart.tmpl";
    pub const ORDER_PLACED: &str = "orderplaced.tmpl";
    pub const ORDERS: &str = "orders.tmpl";
}

#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error("Template {0} does not exist")]
    UnknownTemplate(String),
    #[error("Template execution failed: {0}")]
    ExecutionFailed(String),
}

/// Renders a named template against a context into the payload of a reply.
///
/// The context is the JSON serialization of one of the types in
/// [`render_objects`](crate::store_api::render_objects).
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<Vec<u8>, RenderError>;
}
