pub mod availability;
pub mod lifecycle;
pub mod reconciliation;

mod error;
pub use error::BookingError;

use crate::{
    models::Booking,
    ports::{Application, Repository},
};

/// The identifier type of an application's booking store
pub type BookingId<A> = <<A as Application>::Repository as Repository>::BookingId;

/// A booking as stored by an application
pub type BookingOf<A> = Booking<BookingId<A>>;

/// The error produced by the booking services of an application
pub type ServiceError<A> = BookingError<<<A as Application>::Repository as Repository>::Error>;

/// Reject blank user identifiers before they reach the store.
fn validate_user_id<E>(user_id: &str) -> Result<(), BookingError<E>> {
    if user_id.trim().is_empty() {
        Err(BookingError::InvalidArgument(
            "a non-empty user id is required".to_owned(),
        ))
    } else {
        Ok(())
    }
}
