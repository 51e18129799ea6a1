//! The booking lifecycle: creation, owner-facing reads and writes, and the
//! payment-driven transitions.
//!
//! Every transition is written as a compare-and-set on the booking's status,
//! so two concurrent requests can never both move the same booking.

use super::{
    BookingError, BookingId, BookingOf, ServiceError, availability::room_is_free, validate_user_id,
};
use crate::{
    models::{
        Booking, BookingChanges, BookingPatch, BookingStatus, CreatedBooking, NewBooking, PaymentItem,
        StayRange,
    },
    ports::{Application, BookingRepository, PaymentGateway},
};
use tracing::{Level, event};

fn check_text<E>(field: &str, value: &str) -> Result<(), BookingError<E>> {
    if value.trim().is_empty() {
        Err(BookingError::invalid_argument(format!(
            "{field} must not be empty"
        )))
    } else {
        Ok(())
    }
}

fn check_count<E>(field: &str, value: u32) -> Result<(), BookingError<E>> {
    if value == 0 {
        Err(BookingError::invalid_argument(format!(
            "{field} must be at least 1"
        )))
    } else {
        Ok(())
    }
}

fn check_price<E>(value: f64) -> Result<(), BookingError<E>> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(BookingError::invalid_argument(
            "totalPrice must be a non-negative number",
        ))
    }
}

fn validate_new_booking<E>(booking: &NewBooking) -> Result<StayRange, BookingError<E>> {
    check_text("roomId", &booking.room_id)?;
    check_text("roomType", &booking.room_type)?;
    check_count("numberOfRooms", booking.number_of_rooms)?;
    check_count("numberOfGuests", booking.number_of_guests)?;
    check_price(booking.total_price)?;
    Ok(StayRange::new(booking.check_in, booking.check_out)?)
}

fn validate_patch<E>(patch: &BookingPatch) -> Result<(), BookingError<E>> {
    if let Some(room_id) = &patch.room_id {
        check_text("roomId", room_id)?;
    }
    if let Some(room_type) = &patch.room_type {
        check_text("roomType", room_type)?;
    }
    if let Some(rooms) = patch.number_of_rooms {
        check_count("numberOfRooms", rooms)?;
    }
    if let Some(guests) = patch.number_of_guests {
        check_count("numberOfGuests", guests)?;
    }
    if let Some(price) = patch.total_price {
        check_price(price)?;
    }
    Ok(())
}

/// The checkout lines for a booking: a single line covering the whole stay.
pub fn payment_items<Id: ToString>(
    booking: &Booking<Id>,
    stay: &StayRange,
    currency: &str,
) -> Vec<PaymentItem> {
    vec![PaymentItem {
        id: booking.id.to_string(),
        title: format!("Booking {}", booking.room_type),
        description: format!("{} night(s)", stay.nights()),
        quantity: 1,
        currency: currency.to_owned(),
        unit_price: booking.total_price,
    }]
}

/// Explain why a conditional write did not happen.
async fn refused<A: Application>(app: &A, booking_id: &BookingId<A>) -> ServiceError<A> {
    match app.database().get_booking(booking_id).await {
        Ok(Some(booking)) => BookingError::invalid_state(format!(
            "booking is {} and cannot make this transition",
            booking.status
        )),
        Ok(None) => BookingError::NotFound,
        Err(err) => BookingError::Storage(err),
    }
}

/// Create a booking for `user_id`.
///
/// The room must be free for the stay. The booking is stored with status
/// `created`, given a confirmation code, and offered a hosted-payment page.
/// Failing to reach the payment provider does not fail the booking; the
/// returned preference is then `None`.
pub async fn create_booking<A: Application>(
    app: &A,
    booking: NewBooking,
    user_id: &str,
) -> Result<CreatedBooking<BookingId<A>>, ServiceError<A>> {
    validate_user_id(user_id)?;
    let stay = validate_new_booking(&booking)?;
    let db = app.database();

    if !room_is_free(db, &booking.room_id, &stay, None).await? {
        return Err(BookingError::RoomUnavailable(booking.room_id));
    }

    let now = app.now();
    let created = db
        .create_booking(user_id, booking, now)
        .await
        .map_err(BookingError::Storage)?;

    let changes = BookingChanges {
        confirmation_code: Some(app.generate_confirmation_code(now)),
        ..Default::default()
    };
    let created = match db
        .update_booking(&created.id, changes, &[BookingStatus::Created], now)
        .await
        .map_err(BookingError::Storage)?
    {
        Some(booking) => booking,
        None => return Err(refused(app, &created.id).await),
    };

    let items = payment_items(&created, &stay, app.payments().currency());
    let payment_preference = match app
        .payments()
        .create_payment_preference(items, &created.id.to_string(), user_id)
        .await
    {
        Ok(preference) => Some(preference),
        Err(err) => {
            event!(
                Level::WARN,
                booking_id = %created.id,
                err = err.to_string(),
                "could not create a payment preference"
            );
            None
        }
    };

    event!(
        Level::INFO,
        booking_id = %created.id,
        room_id = %created.room_id,
        confirmation_code = created.confirmation_code.as_deref(),
        "booking created"
    );

    Ok(CreatedBooking {
        booking: created,
        payment_preference,
    })
}

/// List every booking owned by `user_id`, most recently created first.
pub async fn get_user_bookings<A: Application>(
    app: &A,
    user_id: &str,
) -> Result<Vec<BookingOf<A>>, ServiceError<A>> {
    validate_user_id(user_id)?;
    let mut bookings = app
        .database()
        .query_bookings_by_user(user_id)
        .await
        .map_err(BookingError::Storage)?;
    bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
    Ok(bookings)
}

/// Retrieve a booking owned by `user_id`.
///
/// A booking owned by someone else is reported as [`BookingError::NotFound`]
/// so its existence is not disclosed.
pub async fn get_booking_by_id<A: Application>(
    app: &A,
    booking_id: &BookingId<A>,
    user_id: &str,
) -> Result<BookingOf<A>, ServiceError<A>> {
    validate_user_id(user_id)?;
    app.database()
        .get_booking(booking_id)
        .await
        .map_err(BookingError::Storage)?
        .filter(|booking| booking.user_id == user_id)
        .ok_or(BookingError::NotFound)
}

/// Apply an owner's changes to a booking that has not entered payment.
///
/// Moving the booking to another room or other dates re-checks
/// availability for the resulting stay.
pub async fn update_booking<A: Application>(
    app: &A,
    booking_id: &BookingId<A>,
    patch: BookingPatch,
    user_id: &str,
) -> Result<BookingOf<A>, ServiceError<A>> {
    let current = get_booking_by_id(app, booking_id, user_id).await?;
    if !current.status.is_updatable() {
        return Err(BookingError::invalid_state(format!(
            "cannot update a booking that is {}",
            current.status
        )));
    }
    validate_patch(&patch)?;
    if patch.is_empty() {
        return Ok(current);
    }

    if patch.moves_stay() {
        let room_id = patch.room_id.as_deref().unwrap_or(&current.room_id);
        let stay = StayRange::new(
            patch.check_in.unwrap_or(current.check_in),
            patch.check_out.unwrap_or(current.check_out),
        )?;
        if !room_is_free(app.database(), room_id, &stay, Some(&current.id)).await? {
            return Err(BookingError::RoomUnavailable(room_id.to_owned()));
        }
    }

    let updated = app
        .database()
        .update_booking(
            &current.id,
            patch.into(),
            BookingStatus::UPDATABLE,
            app.now(),
        )
        .await
        .map_err(BookingError::Storage)?;

    match updated {
        Some(booking) => {
            event!(Level::INFO, booking_id = %booking.id, "booking updated");
            Ok(booking)
        }
        None => Err(refused(app, &current.id).await),
    }
}

/// Cancel a booking owned by `user_id`.
///
/// Confirmed bookings cannot be cancelled here; refunds are handled with the
/// payment provider directly.
pub async fn cancel_booking<A: Application>(
    app: &A,
    booking_id: &BookingId<A>,
    user_id: &str,
) -> Result<BookingOf<A>, ServiceError<A>> {
    let current = get_booking_by_id(app, booking_id, user_id).await?;
    if !current.status.is_cancellable() {
        return Err(BookingError::invalid_state(format!(
            "cannot cancel a booking that is {}",
            current.status
        )));
    }

    let cancelled = app
        .database()
        .update_booking(
            &current.id,
            BookingChanges::status(BookingStatus::Cancelled),
            BookingStatus::CANCELLABLE,
            app.now(),
        )
        .await
        .map_err(BookingError::Storage)?;

    match cancelled {
        Some(booking) => {
            event!(Level::INFO, booking_id = %booking.id, "booking cancelled");
            Ok(booking)
        }
        None => Err(refused(app, &current.id).await),
    }
}

/// Record the payment reference the provider issued for an owner's booking,
/// moving it to `pending_payment`.
///
/// Attaching the reference the booking already holds is a no-op. A booking
/// never trades its reference for another, and a reference is never shared
/// between bookings.
pub async fn attach_payment_reference<A: Application>(
    app: &A,
    booking_id: &BookingId<A>,
    user_id: &str,
    payment_id: &str,
) -> Result<BookingOf<A>, ServiceError<A>> {
    let payment_id = payment_id.trim();
    check_text("paymentId", payment_id)?;
    let current = get_booking_by_id(app, booking_id, user_id).await?;

    if let Some(existing) = current.payment_id.as_deref() {
        if existing != payment_id {
            return Err(BookingError::invalid_state(
                "booking already holds a different payment reference",
            ));
        }
    }
    match current.status {
        BookingStatus::PendingPayment if current.payment_id.is_some() => return Ok(current),
        BookingStatus::Created | BookingStatus::PendingPayment => {}
        status => {
            return Err(BookingError::invalid_state(format!(
                "cannot attach a payment to a booking that is {status}"
            )));
        }
    }

    let db = app.database();
    if let Some(holder) = db
        .find_booking_by_payment_id(payment_id)
        .await
        .map_err(BookingError::Storage)?
    {
        if holder.id != current.id {
            return Err(BookingError::invalid_state(
                "payment reference is already in use",
            ));
        }
    }

    let changes = BookingChanges {
        status: Some(BookingStatus::PendingPayment),
        payment_id: Some(payment_id.to_owned()),
        ..Default::default()
    };
    let attached = db
        .update_booking(
            &current.id,
            changes,
            &[BookingStatus::Created, BookingStatus::PendingPayment],
            app.now(),
        )
        .await
        .map_err(BookingError::Storage)?;

    match attached {
        Some(booking) => {
            event!(
                Level::INFO,
                booking_id = %booking.id,
                payment_id,
                "payment reference attached"
            );
            Ok(booking)
        }
        None => Err(refused(app, &current.id).await),
    }
}

/// Confirm a booking whose payment has settled.
///
/// Confirming a booking that is already confirmed returns it unchanged,
/// which makes redelivered notifications harmless. The room is checked
/// against every other confirmed booking in the same write that confirms
/// this one; if it has been taken the booking stays unconfirmed and the
/// payment must be refunded by hand.
pub async fn confirm_booking_payment<A: Application>(
    app: &A,
    booking_id: &BookingId<A>,
    payment_id: &str,
) -> Result<BookingOf<A>, ServiceError<A>> {
    check_text("paymentId", payment_id)?;
    let db = app.database();
    let booking = db
        .get_booking(booking_id)
        .await
        .map_err(BookingError::Storage)?
        .ok_or(BookingError::NotFound)?;

    if booking.status == BookingStatus::Confirmed {
        return Ok(booking);
    }
    if !booking.status.is_confirmable() {
        return Err(BookingError::invalid_state(format!(
            "cannot confirm a booking that is {}",
            booking.status
        )));
    }
    if let Some(existing) = booking.payment_id.as_deref() {
        if existing != payment_id {
            return Err(BookingError::invalid_state(
                "booking already holds a different payment reference",
            ));
        }
    }
    booking.stay()?;

    let confirmed = db
        .confirm_booking(&booking.id, payment_id, BookingStatus::CONFIRMABLE, app.now())
        .await
        .map_err(BookingError::Storage)?;

    if let Some(booking) = confirmed {
        event!(
            Level::INFO,
            booking_id = %booking.id,
            payment_id,
            "booking confirmed"
        );
        return Ok(booking);
    }

    // the write was refused, find out which condition failed
    let current = db
        .get_booking(&booking.id)
        .await
        .map_err(BookingError::Storage)?
        .ok_or(BookingError::NotFound)?;
    match current.status {
        // a concurrent delivery of the same notification won
        BookingStatus::Confirmed => Ok(current),
        status if status.is_confirmable() => {
            if current
                .payment_id
                .as_deref()
                .is_some_and(|existing| existing != payment_id)
            {
                return Err(BookingError::invalid_state(
                    "booking already holds a different payment reference",
                ));
            }
            event!(
                Level::ERROR,
                booking_id = %current.id,
                room_id = %current.room_id,
                payment_id,
                "paid booking conflicts with a confirmed booking and needs a manual refund"
            );
            Err(BookingError::RoomUnavailable(current.room_id))
        }
        status => Err(BookingError::invalid_state(format!(
            "cannot confirm a booking that is {status}"
        ))),
    }
}

/// Find the booking holding a payment reference.
pub async fn find_booking_by_payment_id<A: Application>(
    app: &A,
    payment_id: &str,
) -> Result<Option<BookingOf<A>>, ServiceError<A>> {
    app.database()
        .find_booking_by_payment_id(payment_id)
        .await
        .map_err(BookingError::Storage)
}
