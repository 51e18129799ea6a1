use super::{BookingRepository, PaymentGateway};
use crate::models::Room;
use time::OffsetDateTime;

/// The composition root of a booking backend.
///
/// An implementation owns one instance of every external collaborator and
/// hands out references to them; nothing in the core reaches for a global.
/// It also decides how a request context maps to a user, which lets the
/// HTTP layer stay agnostic of the identity provider.
pub trait Application: Send + Sync {
    /// The per-request context, e.g. an `Authorization` header
    type Context: Send + Sync;

    /// The booking store
    type Repository: BookingRepository;

    /// The payment provider
    type Payments: PaymentGateway;

    /// Get a reference to the booking store
    fn database(&self) -> &Self::Repository;

    /// Get a reference to the payment provider
    fn payments(&self) -> &Self::Payments;

    /// The rooms of the property
    fn rooms(&self) -> &[Room];

    /// The current time
    fn now(&self) -> OffsetDateTime;

    /// Produce a fresh confirmation code for a booking created at `now`.
    fn generate_confirmation_code(&self, now: OffsetDateTime) -> String;

    /// Whether the payment status must be checked with the provider before
    /// a notification is allowed to confirm a booking.
    fn verify_payments(&self) -> bool {
        false
    }

    /// Resolve the user making a request, or `None` if the context carries
    /// no valid session.
    fn authenticate(
        &self,
        context: &Self::Context,
    ) -> impl Future<Output = Option<String>> + Send;
}
