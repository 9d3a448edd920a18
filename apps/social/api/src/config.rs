use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig, store::StoreConfig};

pub use core_config::Environment;

/// Gateway configuration
/// Composes shared config components from the `core_config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=8000
        let store = StoreConfig::from_env()?; // SOCIAL_STORE, HELIX_*

        Ok(Self {
            app: app_info!(),
            server,
            store,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_config::store::StoreBackend;

    #[test]
    fn test_config_defaults() {
        temp_env::with_vars(
            [
                ("APP_ENV", None::<&str>),
                ("PORT", None),
                ("SOCIAL_STORE", None),
                ("HELIX_ENDPOINT", None),
                ("HELIX_PORT", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "social_api");
                assert_eq!(config.server.port, 8000);
                assert_eq!(config.store.backend, StoreBackend::Helix);
                assert_eq!(config.store.base_url(), "http://localhost:6969");
                assert!(config.environment.is_development());
            },
        );
    }

    #[test]
    fn test_config_rejects_bad_port() {
        temp_env::with_var("PORT", Some("eighty"), || {
            assert!(Config::from_env().is_err());
        });
    }
}
