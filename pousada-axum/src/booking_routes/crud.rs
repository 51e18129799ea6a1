use super::Id;
use crate::{
    ApiApplication, Session,
    error::{ApiError, api_error},
};

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use pousada_core::{
    models::{Booking, BookingPatch, CreatedBooking, NewBooking},
    services::{BookingId, lifecycle},
};

/// Book a room for the authenticated user.
///
/// # Returns
///
/// - `201 Created`: The booking and, when the provider answered, its checkout
/// - `400 Bad Request`: The stay or one of the fields is invalid
/// - `401 Unauthorized`: Missing or invalid token
/// - `409 Conflict`: A confirmed booking already holds the room
pub(crate) async fn create_booking<T: ApiApplication>(
    State(app): State<T>,
    Session(user_id): Session,
    Json(body): Json<NewBooking>,
) -> Result<(StatusCode, Json<CreatedBooking<BookingId<T>>>), ApiError> {
    lifecycle::create_booking(&app, body, &user_id)
        .await
        .map(|created| (StatusCode::CREATED, Json(created)))
        .map_err(api_error)
}

/// List the authenticated user's bookings, most recent first.
pub(crate) async fn list_bookings<T: ApiApplication>(
    State(app): State<T>,
    Session(user_id): Session,
) -> Result<Json<Vec<Booking<BookingId<T>>>>, ApiError> {
    lifecycle::get_user_bookings(&app, &user_id)
        .await
        .map(Json)
        .map_err(api_error)
}

/// Retrieve a single booking.
///
/// Bookings of other users are reported as `404 Not Found`, exactly like
/// bookings that do not exist.
pub(crate) async fn read_booking<T: ApiApplication>(
    State(app): State<T>,
    Session(user_id): Session,
    Path(Id { booking_id }): Path<Id<BookingId<T>>>,
) -> Result<Json<Booking<BookingId<T>>>, ApiError> {
    lifecycle::get_booking_by_id(&app, &booking_id, &user_id)
        .await
        .map(Json)
        .map_err(api_error)
}

/// Edit a booking that has not entered payment.
///
/// # Returns
///
/// - `200 OK`: The updated booking
/// - `400 Bad Request`: A changed field is invalid
/// - `404 Not Found`: No such booking for this user
/// - `409 Conflict`: The booking is past editing, or the new room is taken
pub(crate) async fn update_booking<T: ApiApplication>(
    State(app): State<T>,
    Session(user_id): Session,
    Path(Id { booking_id }): Path<Id<BookingId<T>>>,
    Json(body): Json<BookingPatch>,
) -> Result<Json<Booking<BookingId<T>>>, ApiError> {
    lifecycle::update_booking(&app, &booking_id, body, &user_id)
        .await
        .map(Json)
        .map_err(api_error)
}

/// Cancel a booking. Served on both `DELETE /{bookingId}` and
/// `POST /{bookingId}/cancel`.
pub(crate) async fn cancel_booking<T: ApiApplication>(
    State(app): State<T>,
    Session(user_id): Session,
    Path(Id { booking_id }): Path<Id<BookingId<T>>>,
) -> Result<Json<Booking<BookingId<T>>>, ApiError> {
    lifecycle::cancel_booking(&app, &booking_id, &user_id)
        .await
        .map(Json)
        .map_err(api_error)
}
