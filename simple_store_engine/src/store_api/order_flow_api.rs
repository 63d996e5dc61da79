use log::*;

use crate::{
    db::{file_pattern::ORDER_FILE_PATTERN, traits::StoreBackend},
    db_types::{Order, OrderId, UserId},
    events::OrderPlacedEvent,
    store_api::{
        confirmation::compose_order_message,
        errors::StoreError,
        render_objects::{OrderPlacedContext, OrderSummary, OrdersContext},
        router::Reply,
        store::{cart_key, order_dir, order_key, Store},
    },
    traits::templates,
};

/// The reply body sent when a user tries to check out an empty cart.
pub const EMPTY_ORDER_REPLY: &str = "No items in order";

#[derive(Debug, Clone, PartialEq)]
pub enum PlaceOrderOutcome {
    /// The cart was empty. Nothing was written.
    EmptyCart,
    Placed {
        order: Order,
        /// The buyer-facing confirmation message.
        message: String,
    },
}

impl<B> Store<B>
where B: StoreBackend
{
    /// Converts the user's cart into a new order.
    ///
    /// The whole operation runs under the store lock:
    /// 1. The cart is loaded. An empty cart yields [`PlaceOrderOutcome::EmptyCart`].
    /// 2. The order gets the next id in the user's sequence and a snapshot of the cart and shipping charge.
    /// 3. An exchange rate is recorded, if one can be had, and payment instructions are resolved. Payment problems are
    ///    logged and leave the order with `PayType::None`; they never stop the order from being placed.
    /// 4. The order is written, then the cart is removed.
    /// 5. Order-placed hook subscribers are notified. This happens only once the order is stored, so subscribers never
    ///    hear about an order that failed to persist. Notification never waits on a subscriber.
    ///
    /// Storage failures abort the operation and are returned as errors. If the order write fails, the cart is left in
    /// place.
    pub async fn place_order(&self, user: &UserId) -> Result<PlaceOrderOutcome, StoreError> {
        let _guard = self.lock().await;
        let cart = self.load_cart(user).await?;
        if cart.is_empty() {
            debug!("📦️ {user} tried to place an order with an empty cart");
            return Ok(PlaceOrderOutcome::EmptyCart);
        }
        let id = self.next_order_id(user).await?;
        let mut order = Order::new(user.clone(), cart, id, self.config.ship_charge);
        order.exchange_rate = self.payments.fetch_rate().await.map(|r| r.rate);
        let resolution = self.payments.resolve(self.config.pay_type, &self.config.account, &order).await;
        resolution.apply(&mut order);
        let message = compose_order_message(&order, &resolution);

        self.db.write(&order_key(user, id), &order).await?;
        self.db.remove_if_exists(&cart_key(user)).await?;
        info!(
            "📦️ Order {id} placed by {user}. {} line items for {} (pay type: {})",
            order.cart.items.len(),
            order.grand_total(),
            order.pay_type
        );
        self.call_order_placed_hook(&order, &message);
        Ok(PlaceOrderOutcome::Placed { order, message })
    }

    /// One more than the highest order id already stored for the user, so ids stay unique even if files are removed.
    async fn next_order_id(&self, user: &UserId) -> Result<OrderId, StoreError> {
        let last = self.db.last_sequence(&order_dir(user), &ORDER_FILE_PATTERN).await?;
        Ok(OrderId(last).next())
    }

    /// Subscribers are notified without waiting, since the store lock is still held. If a subscriber has fallen
    /// behind and its channel is full, the event is dropped and a warning logged.
    fn call_order_placed_hook(&self, order: &Order, message: &str) {
        for emitter in &self.producers.order_placed_producer {
            debug!("📦️ Notifying order placed hook subscribers");
            let event = OrderPlacedEvent::new(order.clone(), message.to_string());
            emitter.try_publish_event(event);
        }
    }

    /// All of the user's stored orders, sorted by id. Documents that cannot be read are logged and skipped.
    pub async fn orders(&self, user: &UserId) -> Result<Vec<Order>, StoreError> {
        let _guard = self.lock().await;
        let keys = self.db.keys(&format!("{}/", order_dir(user))).await?;
        let mut orders = Vec::with_capacity(keys.len());
        for key in keys {
            match self.db.read::<Order>(&key).await {
                Ok(Some(order)) => orders.push(order),
                Ok(None) => trace!("📦️ Order {key} disappeared while listing orders"),
                Err(e) => warn!("📦️ Unable to read order {key}: {e}"),
            }
        }
        orders.sort_by_key(|o| o.id);
        Ok(orders)
    }

    pub async fn handle_place_order(&self, user: &UserId) -> Result<Reply, StoreError> {
        match self.place_order(user).await? {
            PlaceOrderOutcome::EmptyCart => Ok(Reply::ok(EMPTY_ORDER_REPLY.as_bytes().to_vec())),
            PlaceOrderOutcome::Placed { order, message } => {
                let context = OrderPlacedContext { summary: OrderSummary::new(&order), message: &message };
                self.render(templates::ORDER_PLACED, &context)
            },
        }
    }

    pub async fn handle_orders(&self, user: &UserId) -> Result<Reply, StoreError> {
        let orders = self.orders(user).await?;
        let context = OrdersContext { orders: orders.iter().map(OrderSummary::new).collect() };
        self.render(templates::ORDERS, &context)
    }
}
