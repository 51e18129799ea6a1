//! REST API endpoints for bookings and room availability.
//!
//! Every route requires a bearer token; a booking is only ever visible to the
//! user who made it.

use crate::ApiApplication;
use aide::{
    axum::{
        ApiRouter,
        routing::{get, get_with, post, post_with},
    },
    transform::TransformOperation,
};

mod availability;
use availability::*;

mod crud;
use crud::*;

mod payment;
use payment::*;

/// Path parameter for booking-specific endpoints.
#[derive(serde::Deserialize, schemars::JsonSchema)]
#[schemars(inline)]
#[serde(rename_all = "camelCase")]
struct Id<T> {
    /// The identifier of the booking
    booking_id: T,
}

/// Creates a router with the booking and availability endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with(
            "/",
            get_with(list_bookings::<T>, list_bookings_docs)
                .post_with(create_booking::<T>, create_booking_docs),
            |route| route.security_requirement("jwt").tag("booking"),
        )
        .api_route_with(
            "/availability",
            post(check_rooms::<T>),
            |route| route.security_requirement("jwt").tag("availability"),
        )
        .api_route_with(
            "/availability/{roomId}",
            get(check_room::<T>),
            |route| route.security_requirement("jwt").tag("availability"),
        )
        .api_route_with(
            "/available-rooms",
            get(available_rooms::<T>),
            |route| route.security_requirement("jwt").tag("availability"),
        )
        .api_route_with(
            "/{bookingId}",
            get(read_booking::<T>)
                .put_with(update_booking::<T>, update_booking_docs)
                .delete(cancel_booking::<T>),
            |route| route.security_requirement("jwt").tag("booking"),
        )
        .api_route_with(
            "/{bookingId}/cancel",
            post(cancel_booking::<T>),
            |route| route.security_requirement("jwt").tag("booking"),
        )
        .api_route_with(
            "/{bookingId}/payment",
            post_with(attach_payment::<T>, attach_payment_docs),
            |route| {
                route
                    .security_requirement("jwt")
                    .tag("booking")
                    .tag("payment")
            },
        )
}

fn list_bookings_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("List bookings")
        .description("List every booking of the authenticated user, most recent first.")
        .response_with::<401, String, _>(|res| res.description("Missing or invalid token"))
}

fn create_booking_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Create a booking")
        .description(
            r#"
            Book a room for a stay. The room must not be held by a confirmed booking
            for any night of the stay. The response carries the booking, with its
            confirmation code, and the hosted checkout page to pay it; the checkout
            is omitted when the payment provider could not be reached.
            "#,
        )
        .response_with::<400, String, _>(|res| res.description("Invalid booking request"))
        .response_with::<401, String, _>(|res| res.description("Missing or invalid token"))
        .response_with::<409, String, _>(|res| res.description("Room not available"))
}

fn update_booking_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Edit a booking")
        .description(
            r#"
            Change the details of a booking that has not entered payment. Moving it
            to another room or other dates checks availability again. Passing
            `"status": "cancelled"` cancels the booking.
            "#,
        )
        .response_with::<404, String, _>(|res| res.description("Booking not found"))
        .response_with::<409, String, _>(|res| {
            res.description("Booking can no longer be edited, or room not available")
        })
}

fn attach_payment_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Attach a payment")
        .description(
            r#"
            Record the payment id the checkout returned, so the payment provider's
            notification can be matched to this booking. The booking moves to
            `pending_payment`. Repeating the call with the same id is harmless.
            "#,
        )
        .response_with::<404, String, _>(|res| res.description("Booking not found"))
        .response_with::<409, String, _>(|res| {
            res.description("Booking cannot take this payment")
        })
}
