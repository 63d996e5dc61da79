use cucumber::given;
use simple_store_engine::{db_types::PayType, traits::StaticExchangeRate};
use store_common::Cents;

use crate::{
    cucumber::{store_world::StoreSystem, StoreWorld},
    support::TestAddresses,
};

#[given("a fresh store")]
async fn fresh_store(world: &mut StoreWorld) {
    world.system = Some(StoreSystem::new());
}

#[given(expr = "a shipping charge of {int} cents")]
async fn shipping_charge(world: &mut StoreWorld, cents: i64) {
    let system = world.system();
    system.config.ship_charge = Cents::from(cents);
    system.restart();
}

#[given(expr = "an exchange rate of {float} USD per DCR")]
async fn exchange_rate(world: &mut StoreWorld, rate: f64) {
    let system = world.system();
    system.providers = system.providers.clone().with_exchange_rates(StaticExchangeRate::new(rate));
    system.restart();
}

#[given("the store takes on-chain payments")]
async fn onchain_payments(world: &mut StoreWorld) {
    let system = world.system();
    system.config.pay_type = PayType::OnChain;
    system.providers = system.providers.clone().with_onchain(TestAddresses::default());
    system.restart();
}

#[given("the on-chain wallet is unavailable")]
async fn wallet_unavailable(world: &mut StoreWorld) {
    let system = world.system();
    system.providers = system.providers.clone().with_onchain(TestAddresses::failing());
    system.restart();
}
