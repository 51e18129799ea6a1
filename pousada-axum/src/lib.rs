#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the pousada crates.
//! [pousada_core]: https://docs.rs/pousada_core/latest/pousada_core/index.html
#![doc = include_str!("../README.md")]

mod booking_routes;
mod error;
mod payment_routes;
mod session;

use aide::{
    axum::{ApiRouter, routing::get},
    openapi::OpenApi,
};
use axum::{Extension, Json, http::HeaderValue};
use headers::{Authorization, authorization::Bearer};
use pousada_core::ports::{Application, Repository};
use schemars::JsonSchema;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{Level, event};

mod openapi;
use openapi::{api_docs, docs_routes};

pub mod config;
use config::AxumConfig;

pub use session::Session;

/// Response for the health check endpoint
#[derive(Serialize, JsonSchema)]
#[schemars(inline)]
struct HealthResponse {
    status: String,
}

/// Simple health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                event!(Level::WARN, origin, "ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Construct a full API router with the given state and config
pub fn router<T: ApiApplication>(state: T, config: AxumConfig) -> axum::Router {
    let mut api = OpenApi::default();
    let cors = cors_layer(&config.cors_origins);
    ApiRouter::new()
        .api_route("/health", get(health_check))
        .nest("/booking", booking_routes::router())
        .nest("/payment", payment_routes::router())
        .nest_api_service("/docs", docs_routes())
        .finish_api_with(&mut api, api_docs)
        .layer(Extension(Arc::new(api))) // keep the document behind an Arc, it is cloned per request
        .layer(Extension(Arc::new(config)))
        .layer(cors)
        .with_state(state)
}

/// Generate the OpenAPI document without starting a server
pub fn schema<T: ApiApplication>() -> OpenApi {
    let mut api = OpenApi::default();
    let _: axum::Router<T> = ApiRouter::new()
        .api_route("/health", get(health_check))
        .nest("/booking", booking_routes::router::<T>())
        .nest("/payment", payment_routes::router::<T>())
        .finish_api_with(&mut api, api_docs);
    api
}

/// Starts the HTTP server with the provided configuration
pub async fn start_server<T: ApiApplication>(
    config: AxumConfig,
    app: T,
) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    event!(
        Level::INFO,
        address = %listener.local_addr()?,
        "listening for requests"
    );

    let service = router(app, config);
    axum::serve(listener, service).await
}

/// Axum imposes all sorts of constraints on what can pass for state. This
/// trait, coupled with a blanket implementation, specifies it all upfront and
/// in one place. If a function takes a generic `T: ApiApplication`, then
/// everything one might reasonably want to do should work.
pub trait ApiApplication:
    Clone
    + Send
    + Sync
    + 'static
    + Application<
        Context = Authorization<Bearer>,
        Repository: 'static
                        + Repository<
            BookingId: Serialize + DeserializeOwned + JsonSchema + Send + Sync + 'static,
        >,
        Payments: 'static,
    >
{
}

// this is the blanket implementation
impl<T: Clone + Send + Sync + 'static> ApiApplication for T where
    T: Application<
            Context = Authorization<Bearer>,
            Repository: 'static
                            + Repository<
                BookingId: Serialize + DeserializeOwned + JsonSchema + Send + Sync + 'static,
            >,
            Payments: 'static,
        >
{
}
