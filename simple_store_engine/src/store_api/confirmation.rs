//! The plain-text order confirmation sent to buyers.
use std::fmt::Write;

use store_common::BASE_CURRENCY_CODE;

use crate::{
    db_types::Order,
    store_api::{exchange_objects::ExchangeRate, payment_resolver::PaymentResolution},
};

/// How long a settlement-currency quote is honoured, in minutes.
pub const QUOTE_VALIDITY_MINUTES: u32 = 60;

/// Composes the confirmation for a placed order. The order must already carry its exchange rate and, if payment
/// instructions were produced, the resolution that was applied to it.
pub fn compose_order_message(order: &Order, resolution: &PaymentResolution) -> String {
    let mut msg = String::new();
    // Writing to a String never fails.
    let _ = write_order_message(&mut msg, order, resolution);
    msg
}

fn write_order_message(w: &mut String, order: &Order, resolution: &PaymentResolution) -> std::fmt::Result {
    writeln!(w, "Thank you for placing your order {}", order.id)?;
    writeln!(w, "The following were the items in your order:")?;
    for item in &order.cart.items {
        let product = &item.product;
        writeln!(
            w,
            "  SKU {} - {} - {} units - {}/item - {}",
            product.sku,
            product.title,
            item.quantity,
            product.price,
            item.subtotal()
        )?;
    }
    if order.charges_shipping() {
        writeln!(w, "Total item amount: {} {BASE_CURRENCY_CODE}", order.item_total())?;
        writeln!(w, "Shipping and handling charge: {} {BASE_CURRENCY_CODE}", order.ship_charge)?;
    }
    writeln!(w, "Total amount: {} {BASE_CURRENCY_CODE}", order.grand_total())?;

    let settlement = order.settlement_total();
    if let Some(rate) = order.exchange_rate.filter(|_| settlement.value() > 0) {
        writeln!(
            w,
            "Using the current exchange rate of {}, your order is {settlement}, valid for the next \
             {QUOTE_VALIDITY_MINUTES} minutes",
            ExchangeRate::new(rate, Some(order.placed_at))
        )?;
    }

    match resolution {
        PaymentResolution::OnChain { address } => writeln!(w, "On-chain Payment Address: {address}"),
        PaymentResolution::Lightning { invoice } => writeln!(w, "LN Invoice for payment: {invoice}"),
        PaymentResolution::Contact => write!(w, "\nYou will be contacted with payment details shortly"),
        PaymentResolution::Unavailable(_) => Ok(()),
    }
}
