use core_config::store::{StoreBackend, StoreConfig};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_social::{HelixClient, InMemoryStore, SocialService, StoreClient};
use eyre::WrapErr;
use std::sync::Arc;
use tracing::{info, warn};

mod api;
mod config;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    observability::init_metrics().wrap_err("Failed to install metrics recorder")?;

    let store = build_store(&config.store)?;
    let service = SocialService::new(store, config.store.timeout());

    let state = AppState { config, service };
    let server_config = state.config.server.clone();

    let app = api::app(state).await?;

    info!("Starting social gateway");
    axum_helpers::create_app(app, &server_config)
        .await
        .wrap_err("Server error")?;

    info!("Social gateway shutdown complete");
    Ok(())
}

fn build_store(config: &StoreConfig) -> eyre::Result<Arc<dyn StoreClient>> {
    match config.backend {
        StoreBackend::Helix => {
            let client = HelixClient::new(config).wrap_err("Failed to build store client")?;
            info!(
                base_url = client.base_url(),
                timeout_secs = config.timeout_secs,
                api_key = config.api_key.is_some(),
                "Using HelixDB store"
            );
            Ok(Arc::new(client))
        }
        StoreBackend::Memory => {
            warn!("Using in-process store; data is lost on restart");
            Ok(Arc::new(InMemoryStore::new()))
        }
    }
}
