#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the pousada crates.
//! [pousada_core]: https://docs.rs/pousada_core/latest/pousada_core/index.html
#![doc = include_str!("../README.md")]

use pousada_core::{
    models::{PaymentDetails, PaymentItem, PaymentPreference},
    ports::PaymentGateway,
};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{Level, event};

pub mod config;

use config::MercadoPagoConfig;

/// The ways a MercadoPago call can fail
#[derive(Debug, Error)]
pub enum MercadoPagoError {
    /// No access token was configured
    #[error("no MercadoPago access token configured")]
    MissingAccessToken,

    /// The request could not be sent or its response could not be read
    #[error("MercadoPago request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured API URL cannot carry a path
    #[error("invalid MercadoPago API URL: {0}")]
    InvalidApiUrl(String),

    /// MercadoPago answered with an error status
    #[error("MercadoPago answered {status}: {body}")]
    Api {
        /// The HTTP status code
        status: u16,
        /// The response body, as returned
        body: String,
    },
}

/// A client for the MercadoPago checkout and payments APIs.
#[derive(Clone)]
pub struct MercadoPago {
    http: reqwest::Client,
    config: MercadoPagoConfig,
}

#[derive(Debug, Serialize)]
struct PreferenceItem<'a> {
    id: &'a str,
    title: &'a str,
    description: &'a str,
    quantity: u32,
    currency_id: &'a str,
    unit_price: f64,
}

#[derive(Debug, Serialize)]
struct BackUrls {
    success: String,
    failure: String,
    pending: String,
}

#[derive(Debug, Serialize)]
struct PreferenceMetadata<'a> {
    booking_id: &'a str,
    user_id: &'a str,
}

#[derive(Debug, Serialize)]
struct PreferenceRequest<'a> {
    items: Vec<PreferenceItem<'a>>,
    back_urls: BackUrls,
    auto_return: &'static str,
    external_reference: &'a str,
    notification_url: String,
    statement_descriptor: &'a str,
    metadata: PreferenceMetadata<'a>,
}

#[derive(Debug, Deserialize)]
struct PreferenceResponse {
    id: String,
    #[serde(default)]
    init_point: Option<String>,
    #[serde(default)]
    sandbox_init_point: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PaymentResponse {
    #[serde(deserialize_with = "numeric_or_text")]
    id: String,
    status: String,
    #[serde(default)]
    external_reference: Option<String>,
}

fn numeric_or_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

impl MercadoPago {
    /// Build a client, applying the configured timeout to every call.
    pub fn new(config: MercadoPagoConfig) -> Result<Self, MercadoPagoError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    /// The configuration the client was built with
    pub fn config(&self) -> &MercadoPagoConfig {
        &self.config
    }

    fn access_token(&self) -> Result<&str, MercadoPagoError> {
        self.config
            .access_token
            .as_deref()
            .filter(|token| !token.is_empty())
            .ok_or(MercadoPagoError::MissingAccessToken)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.api_url.trim_end_matches('/'))
    }

    fn payment_url(&self, payment_id: &str) -> Result<reqwest::Url, MercadoPagoError> {
        let mut url = reqwest::Url::parse(&self.config.api_url)
            .map_err(|err| MercadoPagoError::InvalidApiUrl(err.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| MercadoPagoError::InvalidApiUrl(self.config.api_url.clone()))?
            .pop_if_empty()
            .extend(["v1", "payments", payment_id]);
        Ok(url)
    }

    fn preference_request<'a>(
        &'a self,
        items: &'a [PaymentItem],
        booking_id: &'a str,
        user_id: &'a str,
    ) -> PreferenceRequest<'a> {
        let frontend = self.config.frontend_url.trim_end_matches('/');
        let backend = self.config.backend_url.trim_end_matches('/');
        PreferenceRequest {
            items: items
                .iter()
                .map(|item| PreferenceItem {
                    id: &item.id,
                    title: &item.title,
                    description: &item.description,
                    quantity: item.quantity,
                    currency_id: &item.currency,
                    unit_price: item.unit_price,
                })
                .collect(),
            back_urls: BackUrls {
                success: format!("{frontend}/booking/success/{booking_id}"),
                failure: format!("{frontend}/booking/failure/{booking_id}"),
                pending: format!("{frontend}/booking/pending/{booking_id}"),
            },
            auto_return: "approved",
            external_reference: booking_id,
            notification_url: format!("{backend}/payment/webhook/mercadopago"),
            statement_descriptor: &self.config.statement_descriptor,
            metadata: PreferenceMetadata {
                booking_id,
                user_id,
            },
        }
    }

    async fn read<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, MercadoPagoError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(MercadoPagoError::Api {
                status: status.as_u16(),
                body,
            })
        }
    }
}

impl PaymentGateway for MercadoPago {
    type Error = MercadoPagoError;

    fn currency(&self) -> &str {
        &self.config.currency
    }

    async fn create_payment_preference(
        &self,
        items: Vec<PaymentItem>,
        booking_id: &str,
        user_id: &str,
    ) -> Result<PaymentPreference, Self::Error> {
        let token = self.access_token()?;
        let body = self.preference_request(&items, booking_id, user_id);

        let response = self
            .http
            .post(self.endpoint("checkout/preferences"))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        let preference: PreferenceResponse = Self::read(response).await?;
        let preference = PaymentPreference {
            id: preference.id,
            init_point: preference.init_point,
            sandbox_init_point: preference.sandbox_init_point,
        };

        event!(
            Level::INFO,
            booking_id,
            preference_id = %preference.id,
            "payment preference created"
        );
        Ok(preference)
    }

    async fn get_payment(&self, payment_id: &str) -> Result<PaymentDetails, Self::Error> {
        let token = self.access_token()?;
        let response = self
            .http
            .get(self.payment_url(payment_id)?)
            .bearer_auth(token)
            .send()
            .await?;
        let payment: PaymentResponse = Self::read(response).await?;

        Ok(PaymentDetails {
            id: payment.id,
            status: payment.status,
            external_reference: payment.external_reference,
        })
    }
}
