//! OpenAPI documentation generation and serving.

use std::sync::Arc;

use aide::{
    axum::{ApiRouter, IntoApiResponse, routing::get},
    openapi::{OpenApi, SecurityScheme, Tag},
    transform::TransformOpenApi,
};
use axum::{
    Extension, Json,
    response::{Html, IntoResponse},
};

/// Serve the RapiDoc page rendering `/docs/api.json`.
async fn serve_rapidoc() -> impl IntoApiResponse {
    let html = r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8">
    <title>Pousada booking API</title>
    <script type="module" src="https://unpkg.com/rapidoc@9.3.8/dist/rapidoc-min.js"></script>
  </head>
  <body>
    <rapi-doc spec-url="/docs/api.json"
        render-style="focused"
        show-method-in-nav-bar="as-colored-text"
        allow-authentication="true"
    ></rapi-doc>
  </body>
</html>"#;
    Html(html).into_response()
}

/// Serve the raw OpenAPI document.
async fn serve_docs(Extension(api): Extension<Arc<OpenApi>>) -> impl IntoApiResponse {
    Json(api).into_response()
}

/// Routes for the documentation endpoints.
pub(crate) fn docs_routes() -> ApiRouter {
    ApiRouter::new()
        .route("/", get(serve_rapidoc))
        .route("/api.json", get(serve_docs))
}

/// The OpenAPI document metadata.
pub(crate) fn api_docs(api: TransformOpenApi) -> TransformOpenApi {
    api.title("Pousada Booking API")
        .summary("Room availability, bookings and payment reconciliation for a small inn.")
        .description(
            "Guests check availability, book rooms and pay through a hosted checkout. \
             The payment provider notifies this API asynchronously, which confirms the booking.",
        )
        .version(env!("CARGO_PKG_VERSION"))
        .security_scheme(
            "jwt",
            SecurityScheme::Http {
                scheme: "bearer".into(),
                bearer_format: Some("JWT".into()),
                description: Some("The `sub` claim identifies the guest".into()),
                extensions: Default::default(),
            },
        )
        .tag(Tag {
            name: "booking".into(),
            description: Some("Create, read, edit and cancel your bookings".into()),
            ..Default::default()
        })
        .tag(Tag {
            name: "availability".into(),
            description: Some("Which rooms are free for a stay".into()),
            ..Default::default()
        })
        .tag(Tag {
            name: "payment".into(),
            description: Some("Checkout and payment-provider callbacks".into()),
            ..Default::default()
        })
}

/// The JSON schema of an RFC3339 timestamp, for request fields.
pub(crate) fn datetime_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
    schemars::json_schema!({
        "type": "string",
        "format": "date-time",
    })
}
