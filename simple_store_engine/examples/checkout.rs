use std::sync::Arc;

use simple_store_engine::{
    db_types::{Product, UserId},
    traits::{RenderError, StaticExchangeRate, TemplateRenderer},
    Catalog,
    MemoryBackend,
    PaymentProviders,
    PlaceOrderOutcome,
    Store,
    StoreConfig,
};
use store_common::Cents;

struct NoPages;

impl TemplateRenderer for NoPages {
    fn render(&self, template: &str, _: &serde_json::Value) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::UnknownTemplate(template.to_string()))
    }
}

#[tokio::main]
async fn main() {
    let mut args = std::env::args();
    args.next(); // executable name
    let Some(user) = args.next().and_then(|s| s.parse::<UserId>().ok()) else {
        println!("Usage: checkout <user> <sku>...");
        return;
    };
    let catalog = Catalog::new([
        Product::new("A1", "Widget", Cents::from(999)),
        Product::new("B2", "Gadget", Cents::from_dollars(25)),
    ])
    .expect("The demo catalog is valid");
    let config = StoreConfig { ship_charge: Cents::from(450), ..StoreConfig::default() };
    let store = Store::new(MemoryBackend::new(), catalog, config, Arc::new(NoPages))
        .with_payment_providers(PaymentProviders::default().with_exchange_rates(StaticExchangeRate::new(25.0)));

    for sku in args {
        if let Err(e) = store.add_to_cart(&user, &sku).await {
            eprintln!("Could not add {sku}. {e}");
        }
    }
    match store.place_order(&user).await {
        Ok(PlaceOrderOutcome::Placed { message, .. }) => println!("{message}"),
        Ok(PlaceOrderOutcome::EmptyCart) => println!("Nothing to order"),
        Err(e) => eprintln!("Invalid input. {e}"),
    }
}
