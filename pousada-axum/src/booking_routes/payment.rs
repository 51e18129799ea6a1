use super::Id;
use crate::{
    ApiApplication, Session,
    error::{ApiError, api_error},
};

use axum::{
    Json,
    extract::{Path, State},
};
use pousada_core::{
    models::{Booking, PaymentReference},
    services::{BookingId, lifecycle},
};

/// Record the checkout's payment id on a booking, moving it to
/// `pending_payment`.
pub(crate) async fn attach_payment<T: ApiApplication>(
    State(app): State<T>,
    Session(user_id): Session,
    Path(Id { booking_id }): Path<Id<BookingId<T>>>,
    Json(body): Json<PaymentReference>,
) -> Result<Json<Booking<BookingId<T>>>, ApiError> {
    lifecycle::attach_payment_reference(&app, &booking_id, &user_id, &body.payment_id)
        .await
        .map(Json)
        .map_err(api_error)
}
