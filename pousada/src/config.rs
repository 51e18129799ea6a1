//! Application configuration management.
//!
//! Configuration can come from default values, a configuration file and
//! environment variables, in increasing order of precedence.

use crate::Cli;
use pousada_core::models::{Room, default_rooms};
use serde::{Deserialize, Serialize};

/// The main application configuration that composes all component configs
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Web server configuration (bind address, CORS origins)
    #[serde(default)]
    pub server: pousada_axum::config::AxumConfig,

    /// Database configuration (file path, pool settings)
    #[serde(default)]
    pub database: pousada_sqlite::config::SqliteConfig,

    /// Payment provider credentials and URLs
    #[serde(default)]
    pub payments: pousada_mercadopago::config::MercadoPagoConfig,

    /// The rooms of the property
    #[serde(default = "default_rooms")]
    pub rooms: Vec<Room>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: Default::default(),
            database: Default::default(),
            payments: Default::default(),
            rooms: default_rooms(),
        }
    }
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file given by the CLI
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern:
    /// `APP_<SECTION>__<KEY>` maps to `<section>.<key>`
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Keep bookings in a file
    /// export APP_DATABASE__DATABASE_PATH="/var/lib/pousada/bookings.db"
    ///
    /// # Set server bind address
    /// export APP_SERVER__BIND_ADDRESS="0.0.0.0:3000"
    ///
    /// # Provide the MercadoPago credentials
    /// export APP_PAYMENTS__ACCESS_TOKEN="APP_USR-..."
    /// ```
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        config = config.add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = &cli.config {
            if path.exists() {
                config = config.add_source(config::File::from(path.as_path()))
            } else {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
        }

        // APP_SERVER__BIND_ADDRESS maps to server.bind_address
        config = config.add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let built_config = config.build()?;
        built_config.try_deserialize().map_err(Into::into)
    }
}
