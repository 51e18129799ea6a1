use crate::models::{PaymentDetails, PaymentItem, PaymentPreference};

/// Interface to the external payment provider.
///
/// The provider hosts the checkout page; the core only asks it for a
/// preference (a checkout reference) when a booking is created and, when
/// configured to, for the status of a payment before confirming a booking.
pub trait PaymentGateway: Send + Sync {
    /// The error produced by any provider call
    type Error: std::error::Error + Send + Sync + 'static;

    /// The ISO 4217 currency checkout lines are priced in
    fn currency(&self) -> &str;

    /// Create a hosted-payment page for a booking.
    fn create_payment_preference(
        &self,
        items: Vec<PaymentItem>,
        booking_id: &str,
        user_id: &str,
    ) -> impl Future<Output = Result<PaymentPreference, Self::Error>> + Send;

    /// Query the provider for the current state of a payment.
    fn get_payment(
        &self,
        payment_id: &str,
    ) -> impl Future<Output = Result<PaymentDetails, Self::Error>> + Send;
}
