use std::{io::Write, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use futures::FutureExt;
use log::*;
use simple_store_engine::{
    db_types::UserId,
    events::{EventHandlers, EventHooks},
    Catalog,
    JsonFileBackend,
    Request,
    ResourceStatus,
    Store,
};

mod config;
mod renderer;

use crate::{
    config::{display_envs, ToolConfig},
    renderer::TerminalRenderer,
};

#[derive(Parser, Debug)]
#[command(version, about = "Browse and shop from a simple store on the command line")]
pub struct Arguments {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[clap(name = "fetch", about = "Fetch a store resource on behalf of a user, e.g. `fetch -u alice addtocart A1`")]
    Fetch(FetchParams),
    #[clap(name = "config", about = "Print the effective configuration and the environment it was read from")]
    Config,
}

#[derive(Debug, Args)]
pub struct FetchParams {
    /// The id of the user making the request
    #[arg(short = 'u', long = "user")]
    user: String,
    /// The resource path. Segments may be given as separate arguments or joined with '/'
    path: Vec<String>,
}

impl FetchParams {
    fn segments(&self) -> Vec<String> {
        self.path.iter().flat_map(|p| p.split('/')).filter(|s| !s.is_empty()).map(String::from).collect()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();
    let args = Arguments::parse();
    let config = ToolConfig::from_env_or_default();
    match args.command {
        Command::Fetch(params) => fetch(config, params).await,
        Command::Config => {
            println!("{config:#?}");
            display_envs();
            Ok(())
        },
    }
}

async fn fetch(config: ToolConfig, params: FetchParams) -> Result<()> {
    let user = params.user.parse::<UserId>()?;
    let catalog = Catalog::load(&config.catalog)
        .await
        .with_context(|| format!("Could not load the catalog from {}", config.catalog.display()))?;
    info!("🚀️ Loaded {} products. Store documents live in {}", catalog.len(), config.root.display());

    let mut hooks = EventHooks::default();
    hooks.on_order_placed(|ev| {
        async move {
            info!("📬️ New order {} from {} for {}", ev.order.id, ev.order.user, ev.order.grand_total());
            debug!("📬️ Confirmation sent to {}:\n{}", ev.order.user, ev.message);
        }
        .boxed()
    });
    let handlers = EventHandlers::new(config.event_buffer, hooks);
    let producers = handlers.producers();
    let listener = handlers.on_order_placed.map(|handler| tokio::spawn(handler.start_handler()));

    let backend = JsonFileBackend::new(&config.root);
    let store = Store::new(backend, catalog, config.store_config(), Arc::new(TerminalRenderer))
        .with_payment_providers(config.payment_providers())
        .with_event_producers(producers);
    let request = Request::new(user, params.segments());
    let reply = store.fetch_resource(&request).await;
    // Dropping the store closes the event channel so the listener can drain and exit
    drop(store);
    if let Some(listener) = listener {
        listener.await?;
    }
    let reply = reply?;
    match reply.status {
        ResourceStatus::Ok => {
            let mut stdout = std::io::stdout();
            stdout.write_all(&reply.data)?;
            stdout.flush()?;
            Ok(())
        },
        ResourceStatus::NotFound => bail!("Resource not found: /{}", request.path.join("/")),
    }
}
