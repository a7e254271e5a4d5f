use serde::{Deserialize, Serialize};
use std::fs;

/// Top-level configuration, loaded from `config/{env}.yaml`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub enable_tracing: bool,
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

/// Record store wiring.
///
/// `backend` selects the implementation: `rest` talks to the remote tabular
/// service, `memory` runs in-process (requires the `mock-store` feature).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StoreConfig {
    pub backend: String,
    pub endpoint: String,
    pub base_id: String,
    /// Falls back to the `TRADEPOST_STORE_API_KEY` env var when unset.
    #[serde(default)]
    pub api_key: Option<String>,
    pub products_table: String,
    pub orders_table: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            endpoint: "https://api.airtable.com/v0".to_string(),
            base_id: String::new(),
            api_key: None,
            products_table: "Products".to_string(),
            orders_table: "Orders".to_string(),
        }
    }
}

impl StoreConfig {
    /// The effective API key: config value, else environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("TRADEPOST_STORE_API_KEY").ok())
            .filter(|k| !k.is_empty())
    }
}

impl AppConfig {
    pub fn load(env: &str) -> Self {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .unwrap_or_else(|_| panic!("Failed to read config file: {}", config_path));
        serde_yaml::from_str(&content).expect("Failed to parse config yaml")
    }
}
