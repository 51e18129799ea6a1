//! Configuration of the MercadoPago client.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Credentials and URLs for talking to MercadoPago.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MercadoPagoConfig {
    /// The seller's access token; without one every call fails
    #[serde(default)]
    pub access_token: Option<String>,

    /// Base URL of the REST API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Where guests are sent back to after checkout
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,

    /// The public base URL of this server, for payment notifications
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// ISO 4217 currency of every checkout line
    #[serde(default = "default_currency")]
    pub currency: String,

    /// The text shown on the guest's card statement
    #[serde(default = "default_statement_descriptor")]
    pub statement_descriptor: String,

    /// Timeout for a single API call
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    /// Check with the API that a payment is approved before confirming a booking
    #[serde(default)]
    pub verify_payments: bool,
}

fn default_api_url() -> String {
    "https://api.mercadopago.com".to_owned()
}

fn default_frontend_url() -> String {
    "http://localhost:3000".to_owned()
}

fn default_backend_url() -> String {
    "http://localhost:8080".to_owned()
}

fn default_currency() -> String {
    "BRL".to_owned()
}

fn default_statement_descriptor() -> String {
    "Pousada Chapada Reserva".to_owned()
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

impl Default for MercadoPagoConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            api_url: default_api_url(),
            frontend_url: default_frontend_url(),
            backend_url: default_backend_url(),
            currency: default_currency(),
            statement_descriptor: default_statement_descriptor(),
            timeout: default_timeout(),
            verify_payments: false,
        }
    }
}
