//! Configuration of the HTTP server.

use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};

/// Configuration for the Axum HTTP server.
///
/// # Examples
///
/// ```
/// use pousada_axum::config::AxumConfig;
///
/// // Listen on every interface, accept requests from any origin
/// let config = AxumConfig::default();
///
/// // Listen locally, only accept browser requests from the booking site
/// let config = AxumConfig {
///     bind_address: "127.0.0.1:3000".parse().unwrap(),
///     cors_origins: vec!["https://pousadachapada.com.br".to_owned()],
/// };
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AxumConfig {
    /// The address to bind the server to
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Origins allowed to call the API from a browser; empty allows any
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8080))
}

impl Default for AxumConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            cors_origins: Vec::new(),
        }
    }
}
