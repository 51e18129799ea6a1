//! Availability of rooms over a stay.
//!
//! A room is free for a stay when no *confirmed* booking of that room
//! overlaps it. Bookings that are merely created or awaiting payment do not
//! hold a room; the race between them is settled at confirmation time.

use super::{BookingError, ServiceError};
use crate::{
    models::{AvailableRoom, BookingStatus, RoomAvailability, StayRange},
    ports::{Application, BookingRepository},
};
use time::OffsetDateTime;
use tracing::{Level, event};

/// Whether `room_id` is free for the stay, ignoring the booking `exclude`.
///
/// Excluding a booking lets a booking re-check its own room without
/// conflicting with itself.
pub(crate) async fn room_is_free<R: BookingRepository>(
    db: &R,
    room_id: &str,
    stay: &StayRange,
    exclude: Option<&R::BookingId>,
) -> Result<bool, BookingError<R::Error>> {
    let confirmed = db
        .query_bookings_by_room_and_status(room_id, BookingStatus::Confirmed)
        .await
        .map_err(BookingError::Storage)?;

    for booking in confirmed {
        if exclude == Some(&booking.id) {
            continue;
        }
        match booking.stay() {
            Ok(other) if other.overlaps(stay) => {
                event!(
                    Level::DEBUG,
                    room_id,
                    conflicting_booking = %booking.id,
                    "room is taken for the requested stay"
                );
                return Ok(false);
            }
            Ok(_) => {}
            Err(_) => {
                // a corrupt document cannot be trusted to leave the room free
                event!(
                    Level::WARN,
                    booking_id = %booking.id,
                    room_id,
                    "confirmed booking has an empty stay"
                );
                return Ok(false);
            }
        }
    }

    Ok(true)
}

/// Check whether a room is free for the stay `[check_in, check_out)`.
pub async fn check_availability<A: Application>(
    app: &A,
    room_id: &str,
    check_in: OffsetDateTime,
    check_out: OffsetDateTime,
) -> Result<bool, ServiceError<A>> {
    let stay = StayRange::new(check_in, check_out)?;
    room_is_free(app.database(), room_id, &stay, None).await
}

/// Check several rooms for the same stay.
///
/// The result holds one entry per requested room, in request order. Any
/// single failure fails the whole call.
pub async fn check_availability_for_multiple_rooms<A: Application>(
    app: &A,
    room_ids: &[String],
    check_in: OffsetDateTime,
    check_out: OffsetDateTime,
) -> Result<Vec<RoomAvailability>, ServiceError<A>> {
    let stay = StayRange::new(check_in, check_out)?;
    let mut result = Vec::with_capacity(room_ids.len());
    for room_id in room_ids {
        let available = room_is_free(app.database(), room_id, &stay, None).await?;
        result.push(RoomAvailability {
            room_id: room_id.clone(),
            available,
        });
    }
    Ok(result)
}

/// List the catalog rooms that are free for a stay, priced for that stay.
///
/// An empty `room_types` selects every room; otherwise a room is listed
/// only if its type matches one of them, ignoring ASCII case.
pub async fn available_rooms_for_period<A: Application>(
    app: &A,
    check_in: OffsetDateTime,
    check_out: OffsetDateTime,
    room_types: &[String],
) -> Result<Vec<AvailableRoom>, ServiceError<A>> {
    let stay = StayRange::new(check_in, check_out)?;
    let nights = stay.nights();

    let mut result = Vec::new();
    for room in app.rooms() {
        let wanted = room_types.is_empty()
            || room_types
                .iter()
                .any(|kind| kind.eq_ignore_ascii_case(&room.room_type));
        if !wanted {
            continue;
        }
        if room_is_free(app.database(), &room.id, &stay, None).await? {
            result.push(AvailableRoom {
                room: room.clone(),
                nights,
                total_price: room.price_per_night * f64::from(nights),
            });
        }
    }
    Ok(result)
}
