//! Callbacks from the payment provider.
//!
//! The provider retries any notification that is not answered with a
//! success status, so these endpoints answer `200 OK` for every body,
//! including ones that cannot be parsed, and report the outcome in the
//! acknowledgment instead.

use crate::ApiApplication;
use aide::{
    axum::{ApiRouter, routing::post_with},
    transform::TransformOperation,
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use pousada_core::{
    models::{PaymentNotification, WebhookAck},
    services::reconciliation,
};
use tracing::{Level, event};

/// Creates a router with the payment-provider callbacks.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new().api_route_with(
        "/webhook/mercadopago",
        post_with(mercadopago_webhook::<T>, mercadopago_webhook_docs),
        |route| route.tag("payment"),
    )
}

async fn mercadopago_webhook<T: ApiApplication>(
    State(app): State<T>,
    body: Result<Json<PaymentNotification>, JsonRejection>,
) -> Json<WebhookAck> {
    match body {
        Ok(Json(notification)) => {
            Json(reconciliation::handle_notification(&app, &notification).await)
        }
        Err(rejection) => {
            event!(
                Level::WARN,
                rejection = rejection.body_text(),
                "malformed payment notification"
            );
            Json(WebhookAck::skipped("Malformed notification"))
        }
    }
}

fn mercadopago_webhook_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("MercadoPago notification")
        .description(
            r#"
            Receives `payment.created` and `payment.updated` events. The booking
            holding the payment id is confirmed; a redelivered event is a no-op.
            The response is always `200 OK`, with `processed` telling whether the
            event was acted on.
            "#,
        )
}
