//! Reconciliation of asynchronous payment-provider notifications.
//!
//! Notifications are matched to bookings through the payment reference the
//! booking holds. Processing never fails outward: every outcome, including
//! internal errors, is reported in the returned [`WebhookAck`] so the
//! provider always receives a success response.

use super::{BookingError, ServiceError, lifecycle};
use crate::{
    models::{BookingStatus, PaymentNotification, WebhookAck},
    ports::{Application, BookingRepository, PaymentGateway},
};
use tracing::{Level, event};

/// Sent when a payment is first registered with the provider
pub const PAYMENT_CREATED: &str = "payment.created";

/// Sent whenever a payment changes state
pub const PAYMENT_UPDATED: &str = "payment.updated";

/// Act on a notification from the payment provider.
///
/// Payment events confirm the booking holding the payment reference.
/// Redelivered events are acknowledged without a second write, and events of
/// any other kind are acknowledged without being acted on.
pub async fn handle_notification<A: Application>(
    app: &A,
    notification: &PaymentNotification,
) -> WebhookAck {
    event!(
        Level::INFO,
        event_id = notification.id.as_deref(),
        action = notification.action.as_deref(),
        "payment notification received"
    );

    match notification.action.as_deref() {
        Some(PAYMENT_CREATED | PAYMENT_UPDATED) => {}
        action => {
            event!(
                Level::INFO,
                action,
                "ignoring payment notification with unhandled action"
            );
            return WebhookAck::skipped("Unhandled action");
        }
    }

    let Some(payment_id) = notification.payment_id() else {
        event!(Level::WARN, "payment notification carries no payment id");
        return WebhookAck::skipped("Missing payment id");
    };

    match reconcile_payment(app, payment_id).await {
        Ok(ack) => ack,
        Err(err) => {
            event!(Level::ERROR, payment_id, err = err.to_string());
            WebhookAck::failed(err)
        }
    }
}

async fn reconcile_payment<A: Application>(
    app: &A,
    payment_id: &str,
) -> Result<WebhookAck, ServiceError<A>> {
    let Some(booking) = app
        .database()
        .find_booking_by_payment_id(payment_id)
        .await
        .map_err(BookingError::Storage)?
    else {
        event!(Level::WARN, payment_id, "no booking holds this payment");
        return Ok(WebhookAck::skipped("Booking not found"));
    };

    if booking.status == BookingStatus::Confirmed {
        event!(
            Level::INFO,
            booking_id = %booking.id,
            payment_id,
            "booking already confirmed"
        );
        return Ok(WebhookAck::already_confirmed(booking.id.to_string()));
    }

    if app.verify_payments() {
        let details = app
            .payments()
            .get_payment(payment_id)
            .await
            .map_err(|err| BookingError::PaymentProvider(err.to_string()))?;
        if !details.is_approved() {
            event!(
                Level::INFO,
                booking_id = %booking.id,
                payment_id,
                status = %details.status,
                "payment not approved yet"
            );
            return Ok(
                WebhookAck::skipped("Payment not approved").for_booking(booking.id.to_string())
            );
        }
        // the reference was chosen by the guest, the payment must be for this booking
        let booking_ref = booking.id.to_string();
        if details.external_reference.as_deref() != Some(booking_ref.as_str()) {
            event!(
                Level::WARN,
                booking_id = %booking.id,
                payment_id,
                external_reference = details.external_reference.as_deref(),
                "payment was made for something else"
            );
            return Ok(
                WebhookAck::skipped("Payment does not match booking").for_booking(booking_ref)
            );
        }
    }

    let confirmed = lifecycle::confirm_booking_payment(app, &booking.id, payment_id).await?;
    Ok(WebhookAck::confirmed(confirmed.id.to_string()))
}
