//! The contexts handed to the [`TemplateRenderer`](crate::traits::TemplateRenderer).
//!
//! Renderers only see serialized data, so every context carries the totals a template would otherwise have to compute.
use serde::Serialize;
use store_common::{cents_as_dollars, Atoms, Cents};

use crate::db_types::{Cart, Order, Product};

#[derive(Debug, Clone, Serialize)]
pub struct IndexContext<'a> {
    pub products: Vec<&'a Product>,
    /// True when the requester is the store operator.
    pub is_admin: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartContext<'a> {
    pub cart: &'a Cart,
    #[serde(with = "cents_as_dollars")]
    pub total: Cents,
}

impl<'a> CartContext<'a> {
    pub fn new(cart: &'a Cart) -> Self {
        Self { cart, total: cart.total() }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AddToCartContext<'a> {
    pub product: &'a Product,
    pub cart: CartContext<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary<'a> {
    pub order: &'a Order,
    #[serde(with = "cents_as_dollars")]
    pub item_total: Cents,
    #[serde(with = "cents_as_dollars")]
    pub grand_total: Cents,
    pub settlement_total: Atoms,
}

impl<'a> OrderSummary<'a> {
    pub fn new(order: &'a Order) -> Self {
        Self {
            order,
            item_total: order.item_total(),
            grand_total: order.grand_total(),
            settlement_total: order.settlement_total(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderPlacedContext<'a> {
    #[serde(flatten)]
    pub summary: OrderSummary<'a>,
    pub message: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrdersContext<'a> {
    pub orders: Vec<OrderSummary<'a>>,
}
