use crate::models::{Booking, BookingChanges, BookingStatus, NewBooking};
use time::OffsetDateTime;

/// Repository interface for booking persistence.
///
/// This trait is a thin persistence boundary over one logical collection of
/// booking documents. Each method performs a single read or a single write;
/// there is no batching and no cross-document transaction.
///
/// Absence is expressed as `Ok(None)` rather than an error, so the caller
/// decides whether a missing booking is a failure.
pub trait BookingRepository: super::Repository {
    /// Persist a new booking with status `created`, assigning it an identifier.
    fn create_booking(
        &self,
        user_id: &str,
        booking: NewBooking,
        as_of: OffsetDateTime,
    ) -> impl Future<Output = Result<Booking<Self::BookingId>, Self::Error>> + Send;

    /// Retrieve a booking by its identifier.
    fn get_booking(
        &self,
        booking_id: &Self::BookingId,
    ) -> impl Future<Output = Result<Option<Booking<Self::BookingId>>, Self::Error>> + Send;

    /// Retrieve every booking owned by `user_id`.
    ///
    /// The order of the results is not guaranteed.
    fn query_bookings_by_user(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Vec<Booking<Self::BookingId>>, Self::Error>> + Send;

    /// Retrieve every booking of `room_id` currently in `status`.
    fn query_bookings_by_room_and_status(
        &self,
        room_id: &str,
        status: BookingStatus,
    ) -> impl Future<Output = Result<Vec<Booking<Self::BookingId>>, Self::Error>> + Send;

    /// Retrieve the booking holding a payment reference.
    ///
    /// At most one booking should hold a given reference. Should the store
    /// contain several, the one with the lowest identifier is returned and
    /// an integrity warning is logged.
    fn find_booking_by_payment_id(
        &self,
        payment_id: &str,
    ) -> impl Future<Output = Result<Option<Booking<Self::BookingId>>, Self::Error>> + Send;

    /// Apply a partial write to a booking, stamping `updated_at` with `as_of`.
    ///
    /// The write only happens if the booking currently holds one of the
    /// `expected` statuses, which makes every transition a single-document
    /// compare-and-set. A confirmation code or payment reference that is
    /// already stored is never overwritten.
    ///
    /// # Returns
    ///
    /// - Ok(Some(booking)) with the updated booking if successful
    /// - Ok(None) if the booking does not exist or its status was not expected
    /// - Err otherwise
    fn update_booking(
        &self,
        booking_id: &Self::BookingId,
        changes: BookingChanges,
        expected: &[BookingStatus],
        as_of: OffsetDateTime,
    ) -> impl Future<Output = Result<Option<Booking<Self::BookingId>>, Self::Error>> + Send;

    /// Confirm a booking, recording `payment_id` unless a reference is
    /// already stored, stamping `updated_at` with `as_of`.
    ///
    /// The write only happens if, at the moment it is applied, the booking
    /// holds one of the `expected` statuses, holds no payment reference or
    /// this one, and no other confirmed booking of the same room overlaps its
    /// stay. Checking the room and writing the status is one atomic step, so
    /// two confirmations racing for the same room cannot both succeed.
    ///
    /// # Returns
    ///
    /// - Ok(Some(booking)) with the confirmed booking if successful
    /// - Ok(None) if the booking does not exist or any condition failed
    /// - Err otherwise
    fn confirm_booking(
        &self,
        booking_id: &Self::BookingId,
        payment_id: &str,
        expected: &[BookingStatus],
        as_of: OffsetDateTime,
    ) -> impl Future<Output = Result<Option<Booking<Self::BookingId>>, Self::Error>> + Send;
}
