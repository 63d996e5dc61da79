use serde::Serialize;

use crate::db_types::Order;

/// Published once for every order that has been persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderPlacedEvent {
    pub order: Order,
    /// The human-readable confirmation intended for the buyer.
    pub message: String,
}

impl OrderPlacedEvent {
    pub fn new(order: Order, message: String) -> Self {
        Self { order, message }
    }
}
