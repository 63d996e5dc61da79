use std::sync::Arc;

use simple_store_engine::{
    db_types::{OrderId, OrderStatusType, PayType},
    traits::{templates, InvoiceProvider, StaticExchangeRate},
    PaymentProviders,
    PlaceOrderOutcome,
    Request,
    ResourceStatus,
    StoreConfig,
    StoreError,
    EMPTY_ORDER_REPLY,
};
use store_common::{Atoms, Cents};

use crate::support::{memory_store, user, TestAddresses, TestInvoices};

mod support;

fn placed(outcome: PlaceOrderOutcome) -> (simple_store_engine::db_types::Order, String) {
    match outcome {
        PlaceOrderOutcome::Placed { order, message } => (order, message),
        PlaceOrderOutcome::EmptyCart => panic!("Expected an order to be placed"),
    }
}

#[tokio::test]
async fn adding_a_product_twice_gives_one_line_item() {
    let (store, _) = memory_store(StoreConfig::default());
    let alice = user("alice");
    let (product, cart) = store.add_to_cart(&alice, "A1").await.unwrap();
    assert_eq!(product.sku, "A1");
    assert_eq!(cart.items[0].quantity, 1);
    let (_, cart) = store.add_to_cart(&alice, "A1").await.unwrap();
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 2);
    assert_eq!(store.cart(&alice).await.unwrap(), cart);
    assert!(store.db().contains("carts/alice"));
}

#[tokio::test]
async fn unknown_skus_cannot_be_added() {
    let (store, _) = memory_store(StoreConfig::default());
    let alice = user("alice");
    let err = store.add_to_cart(&alice, "NOPE").await.unwrap_err();
    assert!(matches!(err, StoreError::ProductNotFound(ref sku) if sku == "NOPE"));
    assert!(store.db().is_empty());
}

#[tokio::test]
async fn carts_are_per_user() {
    let (store, _) = memory_store(StoreConfig::default());
    store.add_to_cart(&user("alice"), "A1").await.unwrap();
    store.add_to_cart(&user("bob"), "B2").await.unwrap();
    let alice = store.cart(&user("alice")).await.unwrap();
    let bob = store.cart(&user("bob")).await.unwrap();
    assert!(alice.item("B2").is_none());
    assert_eq!(bob.item("B2").map(|i| i.quantity), Some(1));
    assert!(store.cart(&user("carol")).await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_cart_places_no_order() {
    let (store, renderer) = memory_store(StoreConfig::default());
    let alice = user("alice");
    assert_eq!(store.place_order(&alice).await.unwrap(), PlaceOrderOutcome::EmptyCart);
    let reply = store.fetch_resource(&Request::new(alice.clone(), ["placeorder"])).await.unwrap();
    assert_eq!(reply.status, ResourceStatus::Ok);
    assert_eq!(reply.text(), EMPTY_ORDER_REPLY);
    assert!(store.db().is_empty());
    assert!(renderer.calls().is_empty());
    assert!(store.orders(&alice).await.unwrap().is_empty());
}

#[tokio::test]
async fn order_ids_increase_from_one() {
    let (store, _) = memory_store(StoreConfig::default());
    let alice = user("alice");
    for expected in 1..=3 {
        store.add_to_cart(&alice, "A1").await.unwrap();
        let (order, _) = placed(store.place_order(&alice).await.unwrap());
        assert_eq!(order.id, OrderId(expected));
        assert!(store.db().contains(&format!("orders/alice/order-{expected}.json")));
        assert!(!store.db().contains("carts/alice"));
    }
    // Another user's sequence starts afresh
    store.add_to_cart(&user("bob"), "B2").await.unwrap();
    let (order, _) = placed(store.place_order(&user("bob")).await.unwrap());
    assert_eq!(order.id, OrderId(1));

    let orders = store.orders(&alice).await.unwrap();
    assert_eq!(orders.iter().map(|o| o.id.value()).collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[tokio::test]
async fn widget_scenario() {
    let (store, _) = memory_store(StoreConfig::default());
    let alice = user("alice");
    store.add_to_cart(&alice, "A1").await.unwrap();
    store.add_to_cart(&alice, "A1").await.unwrap();
    let (order, message) = placed(store.place_order(&alice).await.unwrap());
    assert_eq!(order.grand_total(), Cents::from(1998));
    assert_eq!(order.status, OrderStatusType::Placed);
    assert_eq!(order.pay_type, PayType::None);
    assert_eq!(order.exchange_rate, None);
    assert!(message.starts_with("Thank you for placing your order #1\n"));
    assert!(message.contains("  SKU A1 - Widget - 2 units - $9.99/item - $19.98\n"));
    assert!(message.contains("Total amount: $19.98 USD\n"));
    assert!(!message.contains("Shipping"));
    assert!(store.cart(&alice).await.unwrap().is_empty());
    assert_eq!(store.orders(&alice).await.unwrap(), vec![order]);
}

#[tokio::test]
async fn totals_with_and_without_shipping() {
    let config = StoreConfig { ship_charge: Cents::from_dollars(5), ..StoreConfig::default() };
    let (store, _) = memory_store(config);
    let alice = user("alice");
    store.add_to_cart(&alice, "A1").await.unwrap();
    store.add_to_cart(&alice, "B2").await.unwrap();
    store.add_to_cart(&alice, "B2").await.unwrap();
    let (order, message) = placed(store.place_order(&alice).await.unwrap());
    assert_eq!(order.item_total(), Cents::from(5999));
    assert_eq!(order.grand_total(), Cents::from(6499));
    assert!(message.contains("Total item amount: $59.99 USD\nShipping and handling charge: $5.00 USD\n"));
    assert!(message.contains("Total amount: $64.99 USD\n"));

    // Free items have nothing to ship
    let bob = user("bob");
    store.add_to_cart(&bob, "FREE").await.unwrap();
    let (order, message) = placed(store.place_order(&bob).await.unwrap());
    assert_eq!(order.grand_total(), Cents::from(0));
    assert!(!message.contains("Shipping"));
    assert!(message.contains("Total amount: $0.00 USD\n"));
}

#[tokio::test]
async fn onchain_payment_instructions() {
    let config = StoreConfig { pay_type: PayType::OnChain, ..StoreConfig::default() };
    let (store, _) = memory_store(config);
    let providers = PaymentProviders::default()
        .with_exchange_rates(StaticExchangeRate::new(24.98))
        .with_onchain(TestAddresses::default());
    let store = store.with_payment_providers(providers);
    let alice = user("alice");
    store.add_to_cart(&alice, "B2").await.unwrap();
    let (order, message) = placed(store.place_order(&alice).await.unwrap());
    assert_eq!(order.pay_type, PayType::OnChain);
    assert_eq!(order.invoice.as_deref(), Some("addr-alice-1"));
    assert_eq!(order.exchange_rate, Some(24.98));
    assert!(message.contains("Using the current exchange rate of 24.98 USD/DCR, your order is 1.00080064 DCR"));
    assert!(message.contains("1.00080064 DCR, valid for the next 60 minutes\n"));
    assert!(message.ends_with("On-chain Payment Address: addr-alice-1\n"));
}

#[tokio::test]
async fn failing_address_provider_still_places_the_order() {
    let config = StoreConfig { pay_type: PayType::OnChain, ..StoreConfig::default() };
    let (store, _) = memory_store(config);
    let providers = PaymentProviders::default()
        .with_exchange_rates(StaticExchangeRate::new(25.0))
        .with_onchain(TestAddresses::failing());
    let store = store.with_payment_providers(providers);
    let alice = user("alice");
    store.add_to_cart(&alice, "A1").await.unwrap();
    let (order, message) = placed(store.place_order(&alice).await.unwrap());
    assert_eq!(order.pay_type, PayType::None);
    assert!(order.invoice.is_none());
    assert!(!message.contains("Payment Address"));
    assert!(store.db().contains("orders/alice/order-1.json"));
    assert!(!store.db().contains("carts/alice"));
}

#[tokio::test]
async fn lightning_invoices() {
    let config = StoreConfig { pay_type: PayType::LightningNetwork, ..StoreConfig::default() };
    let (store, _) = memory_store(config);
    let invoices = Arc::new(TestInvoices::default());
    let mut providers = PaymentProviders::default().with_exchange_rates(StaticExchangeRate::new(25.0));
    providers.lightning = Some(invoices.clone() as Arc<dyn InvoiceProvider>);
    let store = store.with_payment_providers(providers);
    let alice = user("alice");
    store.add_to_cart(&alice, "B2").await.unwrap();
    let (order, message) = placed(store.place_order(&alice).await.unwrap());
    assert_eq!(order.settlement_total(), Atoms::from_coins(1));
    assert_eq!(*invoices.requests.lock().unwrap(), vec![100_000_000_000]);
    assert_eq!(order.pay_type, PayType::LightningNetwork);
    assert_eq!(order.invoice.as_deref(), Some("lnsim100000000000"));
    assert!(message.ends_with("LN Invoice for payment: lnsim100000000000\n"));
}

#[tokio::test]
async fn failing_invoice_provider_still_places_the_order() {
    let config = StoreConfig { pay_type: PayType::LightningNetwork, ..StoreConfig::default() };
    let (store, _) = memory_store(config);
    let invoices = Arc::new(TestInvoices::failing());
    let mut providers = PaymentProviders::default().with_exchange_rates(StaticExchangeRate::new(25.0));
    providers.lightning = Some(invoices.clone() as Arc<dyn InvoiceProvider>);
    let store = store.with_payment_providers(providers);
    let alice = user("alice");
    store.add_to_cart(&alice, "B2").await.unwrap();
    let (order, message) = placed(store.place_order(&alice).await.unwrap());
    assert_eq!(*invoices.requests.lock().unwrap(), vec![100_000_000_000]);
    assert_eq!(order.pay_type, PayType::None);
    assert!(order.invoice.is_none());
    assert!(!message.contains("LN Invoice"));
    assert!(message.contains("your order is 1 DCR"));
    assert!(store.db().contains("orders/alice/order-1.json"));
    assert!(!store.db().contains("carts/alice"));
    assert_eq!(store.orders(&alice).await.unwrap(), vec![order]);
}

#[tokio::test]
async fn tiny_exchange_rates_do_not_overflow_invoices() {
    let config = StoreConfig { pay_type: PayType::LightningNetwork, ..StoreConfig::default() };
    let (store, _) = memory_store(config);
    let invoices = Arc::new(TestInvoices::default());
    let mut providers = PaymentProviders::default().with_exchange_rates(StaticExchangeRate::new(1e-12));
    providers.lightning = Some(invoices.clone() as Arc<dyn InvoiceProvider>);
    let store = store.with_payment_providers(providers);
    let alice = user("alice");
    store.add_to_cart(&alice, "B2").await.unwrap();
    let (order, message) = placed(store.place_order(&alice).await.unwrap());
    assert!(invoices.requests.lock().unwrap().is_empty());
    assert_eq!(order.pay_type, PayType::None);
    assert!(order.invoice.is_none());
    assert!(!message.contains("LN Invoice"));
    assert!(store.db().contains("orders/alice/order-1.json"));
    assert!(!store.db().contains("carts/alice"));
}

#[tokio::test]
async fn contact_when_no_channel_is_configured() {
    let (store, _) = memory_store(StoreConfig::default());
    let store =
        store.with_payment_providers(PaymentProviders::default().with_exchange_rates(StaticExchangeRate::new(25.0)));
    let alice = user("alice");
    store.add_to_cart(&alice, "B2").await.unwrap();
    let (order, message) = placed(store.place_order(&alice).await.unwrap());
    assert_eq!(order.pay_type, PayType::None);
    assert!(message.ends_with("\n\nYou will be contacted with payment details shortly"));

    // A zero settlement total gets no quote and no instructions
    store.add_to_cart(&alice, "FREE").await.unwrap();
    let (_, message) = placed(store.place_order(&alice).await.unwrap());
    assert!(!message.contains("exchange rate"));
    assert!(!message.contains("contacted"));
}

#[tokio::test]
async fn router_dispatches_to_handlers() {
    let config = StoreConfig { operator: Some(user("operator")), ..StoreConfig::default() };
    let (store, renderer) = memory_store(config);
    let alice = user("alice");
    let store = &store;
    let fetch = |who: &str, path: &[&str]| {
        let request = Request::new(user(who), path.iter().copied());
        async move { store.fetch_resource(&request).await }
    };

    let reply = fetch("alice", &["index"]).await.unwrap();
    assert!(reply.is_ok());
    let (template, context) = renderer.last().unwrap();
    assert_eq!(template, templates::INDEX);
    assert_eq!(context["is_admin"], false);
    assert_eq!(context["products"].as_array().map(Vec::len), Some(3));
    fetch("operator", &[]).await.unwrap();
    assert_eq!(renderer.last().unwrap().1["is_admin"], true);

    let reply = fetch("alice", &["product", "B2"]).await.unwrap();
    assert!(reply.is_ok());
    let (template, context) = renderer.last().unwrap();
    assert_eq!(template, templates::PRODUCT);
    assert_eq!(context["price"], 25.0);
    assert_eq!(context["description"], "Does gadget things");

    let calls = renderer.calls().len();
    let reply = fetch("alice", &["product", "NOPE"]).await.unwrap();
    assert_eq!(reply.status, ResourceStatus::NotFound);
    assert!(reply.data.is_empty());
    let reply = fetch("alice", &["nothing", "here"]).await.unwrap();
    assert_eq!(reply.status, ResourceStatus::NotFound);
    assert_eq!(renderer.calls().len(), calls);

    fetch("alice", &["addtocart", "A1"]).await.unwrap();
    let (template, context) = renderer.last().unwrap();
    assert_eq!(template, templates::ADD_TO_CART);
    assert_eq!(context["product"]["sku"], "A1");
    assert_eq!(context["cart"]["total"], 9.99);
    let err = fetch("alice", &["addtocart", "NOPE"]).await.unwrap_err();
    assert!(matches!(err, StoreError::ProductNotFound(_)));

    fetch("alice", &["cart"]).await.unwrap();
    let (template, context) = renderer.last().unwrap();
    assert_eq!(template, templates::CART);
    assert_eq!(context["cart"]["items"][0]["quantity"], 1);

    fetch("alice", &["placeorder"]).await.unwrap();
    let (template, context) = renderer.last().unwrap();
    assert_eq!(template, templates::ORDER_PLACED);
    assert_eq!(context["order"]["id"], 1);
    assert_eq!(context["grand_total"], 9.99);
    assert!(context["message"].as_str().unwrap().starts_with("Thank you for placing your order #1"));

    fetch("alice", &["orders"]).await.unwrap();
    let (template, context) = renderer.last().unwrap();
    assert_eq!(template, templates::ORDERS);
    assert_eq!(context["orders"].as_array().map(Vec::len), Some(1));
    assert!(store.cart(&alice).await.unwrap().is_empty());
}

#[tokio::test]
async fn render_failures_are_errors() {
    support::prepare_test_env();
    let store = simple_store_engine::Store::new(
        simple_store_engine::MemoryBackend::new(),
        support::catalog(),
        StoreConfig::default(),
        Arc::new(support::BrokenRenderer),
    );
    let err = store.handle_index(&user("alice")).await.unwrap_err();
    assert!(matches!(err, StoreError::Render { ref template, .. } if template == templates::INDEX));
    assert!(err.to_string().starts_with("unable to execute index.tmpl template"));
    // The cart change is persisted even though the confirmation page could not be rendered
    let err = store.handle_add_to_cart(&user("alice"), "A1").await.unwrap_err();
    assert!(matches!(err, StoreError::Render { .. }));
    assert_eq!(store.cart(&user("alice")).await.unwrap().items.len(), 1);
}
