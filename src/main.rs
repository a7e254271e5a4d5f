//! tradepost entry point
//!
//! Wiring order: config -> logging -> store client -> services -> gateway.
//! The store client is built once here and injected into both services;
//! there is no other process-wide state.

use std::sync::Arc;

use anyhow::Context;

use tradepost::config::{AppConfig, StoreConfig};
use tradepost::gateway;
use tradepost::logging;
use tradepost::order::OrderService;
use tradepost::product::ProductService;
use tradepost::store::{RecordStore, RestStore};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--env" && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

fn build_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn RecordStore>> {
    match config.backend.as_str() {
        "rest" => {
            let api_key = config.resolve_api_key().context(
                "store backend 'rest' needs an API key (config or TRADEPOST_STORE_API_KEY)",
            )?;
            anyhow::ensure!(!config.base_id.is_empty(), "store.base_id is required");
            Ok(Arc::new(RestStore::new(
                config.endpoint.clone(),
                config.base_id.clone(),
                api_key,
            )))
        }
        #[cfg(feature = "mock-store")]
        "memory" => Ok(Arc::new(tradepost::store::MemoryStore::new())),
        other => anyhow::bail!("unknown store backend: {other}"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let config = AppConfig::load(&env);
    let _guard = logging::init_logging(&config);

    tracing::info!(env = %env, backend = %config.store.backend, "tradepost starting");

    let store = build_store(&config.store)?;
    let products = Arc::new(ProductService::new(
        store.clone(),
        config.store.products_table.clone(),
    ));
    let orders = Arc::new(OrderService::new(
        store,
        config.store.orders_table.clone(),
        products.clone(),
    ));

    gateway::run_server(&config.gateway, products, orders).await
}
