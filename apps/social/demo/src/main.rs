//! Social Demo
//!
//! Runs the reference workflow (users, follow ring, posts, embeddings, then
//! every read operation) against a HelixDB store or the in-process store.

use clap::Parser;
use core_config::Environment;
use core_config::store::{
    DEFAULT_ENDPOINT, DEFAULT_STORE_PORT, DEFAULT_TIMEOUT_SECS, StoreBackend, StoreConfig,
};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_social::{HelixClient, InMemoryStore, SocialClient, SocialService, StoreClient};
use eyre::{Result, WrapErr};
use std::sync::Arc;
use tracing::info;

mod workflow;

#[derive(Parser)]
#[command(name = "social_demo")]
#[command(about = "Run the reference social graph workflow")]
struct Cli {
    /// Store endpoint without port
    #[arg(long, env = "HELIX_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Store port; empty when the endpoint already names the full origin
    #[arg(long, env = "HELIX_PORT", default_value_t = DEFAULT_STORE_PORT.to_string())]
    port: String,

    /// API key sent as `x-api-key`
    #[arg(long, env = "HELIX_API_KEY")]
    api_key: Option<String>,

    /// Per-call deadline in seconds
    #[arg(long, env = "HELIX_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS,
          value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: u64,

    /// Use the in-process store instead of HelixDB
    #[arg(long)]
    memory: bool,
}

impl Cli {
    fn store_config(&self) -> Result<StoreConfig> {
        let port = match self.port.trim() {
            "" => None,
            raw => Some(
                raw.parse::<u16>()
                    .wrap_err_with(|| format!("Invalid store port '{}'", raw))?,
            ),
        };
        let mut config = StoreConfig::new(self.endpoint.clone(), port)
            .with_timeout(self.timeout_secs)
            .with_backend(if self.memory {
                StoreBackend::Memory
            } else {
                StoreBackend::Helix
            });
        if let Some(key) = self.api_key.clone().filter(|k| !k.is_empty()) {
            config = config.with_api_key(key);
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();
    init_tracing(&Environment::from_env());

    let cli = Cli::parse();
    let config = cli.store_config()?;

    let store: Arc<dyn StoreClient> = match config.backend {
        StoreBackend::Memory => {
            info!("Running against the in-process store");
            Arc::new(InMemoryStore::new())
        }
        StoreBackend::Helix => {
            let client = HelixClient::new(&config).wrap_err("Failed to build store client")?;
            info!(base_url = client.base_url(), "Running against HelixDB");
            Arc::new(client)
        }
    };

    let client = SocialClient::new(SocialService::new(store, config.timeout()));
    let summary = workflow::run(&client).await?;

    info!(
        users = summary.users.len(),
        posts = summary.posts.len(),
        alice_posts = summary.alice_posts.len(),
        alice_following = summary.alice_following.len(),
        bob_followers = summary.bob_followers.len(),
        similar = summary.similar.len(),
        "Workflow complete"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["social_demo"]).unwrap();
        let config = cli.store_config().unwrap();
        assert_eq!(config.backend, StoreBackend::Helix);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_cli_memory_and_no_port() {
        let cli = Cli::try_parse_from([
            "social_demo",
            "--memory",
            "--endpoint",
            "https://store.example.com/",
            "--port",
            "",
            "--api-key",
            "secret",
        ])
        .unwrap();
        let config = cli.store_config().unwrap();
        assert_eq!(config.backend, StoreBackend::Memory);
        assert_eq!(config.base_url(), "https://store.example.com");
        assert_eq!(config.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_cli_rejects_bad_port() {
        let cli = Cli::try_parse_from(["social_demo", "--port", "http"]).unwrap();
        assert!(cli.store_config().is_err());
    }

    #[test]
    fn test_cli_rejects_zero_timeout() {
        assert!(Cli::try_parse_from(["social_demo", "--timeout-secs", "0"]).is_err());
    }
}
