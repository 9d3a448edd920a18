use crate::{ConfigError, FromEnv, env_or_default, env_parse_or};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost";
pub const DEFAULT_STORE_PORT: u16 = 6969;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which backing store the gateway talks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    /// Remote graph/vector store reached over HTTP
    Helix,
    /// In-process store, for demos and local front-end work
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "helix" => Ok(StoreBackend::Helix),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend '{}' (expected helix or memory)", other)),
        }
    }
}

/// Backing store connection configuration
#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub endpoint: String,
    /// `None` means the endpoint already carries its port (or uses the scheme default)
    pub port: Option<u16>,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl StoreConfig {
    pub fn new(endpoint: impl Into<String>, port: Option<u16>) -> Self {
        Self {
            backend: StoreBackend::Helix,
            endpoint: endpoint.into(),
            port,
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_backend(mut self, backend: StoreBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Base URL operations are appended to, e.g. `http://localhost:6969`
    pub fn base_url(&self) -> String {
        let endpoint = self.endpoint.trim_end_matches('/');
        match self.port {
            Some(port) => format!("{}:{}", endpoint, port),
            None => endpoint.to_string(),
        }
    }

    /// Deadline applied to every store round trip
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl FromEnv for StoreConfig {
    /// Reads from environment variables:
    /// - SOCIAL_STORE: `helix` (default) or `memory`
    /// - HELIX_ENDPOINT: defaults to http://localhost
    /// - HELIX_PORT: defaults to 6969, empty string disables the port suffix
    /// - HELIX_API_KEY: optional
    /// - HELIX_TIMEOUT_SECS: defaults to 30
    fn from_env() -> Result<Self, ConfigError> {
        let backend = env_or_default("SOCIAL_STORE", "helix").parse().map_err(|details| {
            ConfigError::ParseError {
                key: "SOCIAL_STORE".to_string(),
                details,
            }
        })?;

        let endpoint = env_or_default("HELIX_ENDPOINT", DEFAULT_ENDPOINT);

        let port = match std::env::var("HELIX_PORT") {
            Ok(raw) if raw.trim().is_empty() => None,
            Ok(raw) => Some(raw.trim().parse().map_err(|e| ConfigError::ParseError {
                key: "HELIX_PORT".to_string(),
                details: format!("{}", e),
            })?),
            Err(_) => Some(DEFAULT_STORE_PORT),
        };

        let api_key = std::env::var("HELIX_API_KEY").ok().filter(|k| !k.is_empty());

        let timeout_secs = env_parse_or("HELIX_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::ParseError {
                key: "HELIX_TIMEOUT_SECS".to_string(),
                details: "timeout must be at least one second".to_string(),
            });
        }

        Ok(Self {
            backend,
            endpoint,
            port,
            api_key,
            timeout_secs,
        })
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, Some(DEFAULT_STORE_PORT))
    }
}
