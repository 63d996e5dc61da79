use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use store_common::{cents_as_dollars, Atoms, Cents};
use thiserror::Error;

use crate::store_api::exchange_objects::ExchangeRate;

//--------------------------------------        UserId       ---------------------------------------------------------
/// The authenticated identity of the remote peer making a request.
///
/// User ids double as file names in the storage layout, so only values that are safe as a single path component are
/// accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid user id: {0}")]
pub struct InvalidUserId(String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for UserId {
    type Err = InvalidUserId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unsafe_char = |c: char| c == '/' || c == '\\' || c == '\0' || c.is_control();
        if s.is_empty() || s.starts_with('.') || s.chars().any(unsafe_char) {
            return Err(InvalidUserId(s.escape_default().to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for UserId {
    type Error = InvalidUserId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

//--------------------------------------        Product      ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub sku: String,
    pub title: String,
    /// Unit price in the base currency. Persisted as a decimal dollar amount.
    #[serde(with = "cents_as_dollars")]
    pub price: Cents,
    #[serde(default)]
    pub description: String,
}

impl Product {
    pub fn new<S: Into<String>, T: Into<String>>(sku: S, title: T, price: Cents) -> Self {
        Self { sku: sku.into(), title: title.into(), price, description: String::new() }
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }
}

//--------------------------------------        CartItem     ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn subtotal(&self) -> Cents {
        self.product.price * i64::from(self.quantity)
    }
}

//--------------------------------------          Cart       ---------------------------------------------------------
/// A user's pending items. There is at most one item per SKU.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
    pub updated: DateTime<Utc>,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, sku: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product.sku == sku)
    }

    /// Adds one unit of `product`, bumping the quantity of an existing line rather than adding a second one.
    pub fn add_product(&mut self, product: &Product) {
        match self.items.iter_mut().find(|item| item.product.sku == product.sku) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => self.items.push(CartItem { product: product.clone(), quantity: 1 }),
        }
    }

    pub fn total(&self) -> Cents {
        self.items.iter().map(CartItem::subtotal).sum()
    }
}

//--------------------------------------        OrderId      ---------------------------------------------------------
/// Per-user order sequence number, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl From<u64> for OrderId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl OrderId {
    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

//--------------------------------------   OrderStatusType     ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatusType {
    /// The order has been placed by the buyer. This is the only status this engine produces.
    Placed,
    /// The order has been shipped to the buyer.
    Shipped,
    /// The order has been paid for and delivered.
    Completed,
    /// The order was cancelled by the buyer or the store operator.
    Cancelled,
}

impl Display for OrderStatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatusType::Placed => write!(f, "Placed"),
            OrderStatusType::Shipped => write!(f, "Shipped"),
            OrderStatusType::Completed => write!(f, "Completed"),
            OrderStatusType::Cancelled => write!(f, "Cancelled"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid conversion: {0}")]
pub struct ConversionError(String);

impl FromStr for OrderStatusType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Placed" => Ok(Self::Placed),
            "Shipped" => Ok(Self::Shipped),
            "Completed" => Ok(Self::Completed),
            "Cancelled" => Ok(Self::Cancelled),
            s => Err(ConversionError(format!("Invalid order status: {s}"))),
        }
    }
}

//--------------------------------------        PayType      ---------------------------------------------------------
/// The settlement channel for an order.
///
/// As a store setting, `None` means "no automated payment": the buyer is told they will be contacted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayType {
    #[default]
    None,
    OnChain,
    LightningNetwork,
}

impl Display for PayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayType::None => write!(f, "none"),
            PayType::OnChain => write!(f, "onchain"),
            PayType::LightningNetwork => write!(f, "ln"),
        }
    }
}

impl FromStr for PayType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" | "manual" | "contact" => Ok(Self::None),
            "onchain" | "on-chain" => Ok(Self::OnChain),
            "ln" | "lightning" | "lightningnetwork" => Ok(Self::LightningNetwork),
            s => Err(ConversionError(format!("Invalid pay type: {s}"))),
        }
    }
}

//--------------------------------------         Order       ---------------------------------------------------------
/// A placed order. Created once from a non-empty cart and never modified by this engine afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub user: UserId,
    pub cart: Cart,
    pub id: OrderId,
    pub status: OrderStatusType,
    pub placed_at: DateTime<Utc>,
    #[serde(with = "cents_as_dollars")]
    pub ship_charge: Cents,
    /// Base currency per settlement coin at the time of placement, if a rate was available.
    #[serde(default)]
    pub exchange_rate: Option<f64>,
    #[serde(default)]
    pub pay_type: PayType,
    /// On-chain address or Lightning invoice, depending on `pay_type`.
    #[serde(default)]
    pub invoice: Option<String>,
}

impl Order {
    pub fn new(user: UserId, cart: Cart, id: OrderId, ship_charge: Cents) -> Self {
        Self {
            user,
            cart,
            id,
            status: OrderStatusType::Placed,
            placed_at: Utc::now(),
            ship_charge,
            exchange_rate: None,
            pay_type: PayType::None,
            invoice: None,
        }
    }

    pub fn item_total(&self) -> Cents {
        self.cart.total()
    }

    /// Shipping is only charged when there is something to ship and a positive shipping charge is configured.
    pub fn charges_shipping(&self) -> bool {
        self.ship_charge.is_positive() && self.item_total().is_positive()
    }

    pub fn grand_total(&self) -> Cents {
        if self.charges_shipping() {
            self.item_total() + self.ship_charge
        } else {
            self.item_total()
        }
    }

    /// The grand total in the settlement currency. Zero when no usable exchange rate was recorded.
    pub fn settlement_total(&self) -> Atoms {
        match self.exchange_rate {
            Some(rate) => ExchangeRate::new(rate, Some(self.placed_at)).convert_cents(self.grand_total()),
            None => Atoms::default(),
        }
    }
}
