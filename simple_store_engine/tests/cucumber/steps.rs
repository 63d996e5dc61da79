use cucumber::{then, when};
use simple_store_engine::{db_types::PayType, PlaceOrderOutcome, Request, ResourceStatus};

use crate::{cucumber::StoreWorld, support::user};

#[when(expr = "{word} adds {word} to their cart")]
async fn add_to_cart(world: &mut StoreWorld, who: String, sku: String) {
    world.store().add_to_cart(&user(&who), &sku).await.expect("Error adding to cart");
}

#[when(expr = "{word} places an order")]
async fn place_order(world: &mut StoreWorld, who: String) {
    let outcome = world.store().place_order(&user(&who)).await.expect("Error placing order");
    world.system().last_outcome = Some(outcome);
}

#[when(expr = "{word} fetches {string}")]
async fn fetch(world: &mut StoreWorld, who: String, path: String) {
    let request = Request::new(user(&who), path.split('/').filter(|s| !s.is_empty()));
    let reply = world.store().fetch_resource(&request).await.expect("Error fetching resource");
    world.system().last_reply = Some(reply);
}

#[when("the store restarts")]
async fn restart(world: &mut StoreWorld) {
    world.system().restart();
}

#[then(expr = "{word} has {int} unit(s) of {word} in their cart")]
async fn units_in_cart(world: &mut StoreWorld, who: String, quantity: u32, sku: String) {
    let cart = world.store().cart(&user(&who)).await.expect("Error fetching cart");
    let item = cart.item(&sku).unwrap_or_else(|| panic!("{sku} is not in the cart"));
    assert_eq!(item.quantity, quantity);
    assert_eq!(cart.items.iter().filter(|i| i.product.sku == sku).count(), 1);
}

#[then(expr = "{word} has an empty cart")]
async fn empty_cart(world: &mut StoreWorld, who: String) {
    let cart = world.store().cart(&user(&who)).await.expect("Error fetching cart");
    assert!(cart.is_empty());
    let cart_file = world.system().dir.path().join("carts").join(&who);
    assert!(!cart_file.exists());
}

#[then(expr = "{word} has orders {string}")]
async fn has_orders(world: &mut StoreWorld, who: String, ids: String) {
    let orders = world.store().orders(&user(&who)).await.expect("Error fetching orders");
    let actual = orders.iter().map(|o| o.id.value().to_string()).collect::<Vec<_>>().join(", ");
    assert_eq!(actual, ids);
}

#[then(expr = "{word} has no orders")]
async fn has_no_orders(world: &mut StoreWorld, who: String) {
    let orders = world.store().orders(&user(&who)).await.expect("Error fetching orders");
    assert!(orders.is_empty());
    assert!(!world.system().dir.path().join("orders").join(&who).exists());
}

#[then(expr = "order #{int} for {word} totals {int} cents")]
async fn order_total(world: &mut StoreWorld, id: u64, who: String, cents: i64) {
    let order = world.system().order(&who, id).await;
    assert_eq!(order.grand_total().value(), cents);
}

#[then(expr = "order #{int} for {word} is payable on-chain at {string}")]
async fn payable_onchain(world: &mut StoreWorld, id: u64, who: String, address: String) {
    let order = world.system().order(&who, id).await;
    assert_eq!(order.pay_type, PayType::OnChain);
    assert_eq!(order.invoice, Some(address));
}

#[then(expr = "order #{int} for {word} has no payment instructions")]
async fn no_instructions(world: &mut StoreWorld, id: u64, who: String) {
    let order = world.system().order(&who, id).await;
    assert_eq!(order.pay_type, PayType::None);
    assert_eq!(order.invoice, None);
}

#[then(expr = "the confirmation contains {string}")]
async fn confirmation_contains(world: &mut StoreWorld, text: String) {
    match &world.system().last_outcome {
        Some(PlaceOrderOutcome::Placed { message, .. }) => {
            assert!(message.contains(&text), "Confirmation was:\n{message}")
        },
        other => panic!("No order was placed: {other:?}"),
    }
}

#[then("no order was placed")]
async fn no_order_placed(world: &mut StoreWorld) {
    assert_eq!(world.system().last_outcome, Some(PlaceOrderOutcome::EmptyCart));
}

#[then(expr = "the reply is {string}")]
async fn reply_is(world: &mut StoreWorld, text: String) {
    let reply = world.system().last_reply.clone().expect("No reply received");
    assert_eq!(reply.status, ResourceStatus::Ok);
    assert_eq!(reply.text(), text);
}

#[then(expr = "the reply starts with {string}")]
async fn reply_starts_with(world: &mut StoreWorld, text: String) {
    let reply = world.system().last_reply.clone().expect("No reply received");
    assert_eq!(reply.status, ResourceStatus::Ok);
    assert!(reply.text().starts_with(&text), "Reply was:\n{}", reply.text());
}

#[then("the resource is not found")]
async fn not_found(world: &mut StoreWorld) {
    let reply = world.system().last_reply.clone().expect("No reply received");
    assert_eq!(reply.status, ResourceStatus::NotFound);
}
