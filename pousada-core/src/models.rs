mod booking;
mod patch;
mod payment;
mod range;
mod room;
mod status;

pub use booking::{Booking, BookingChanges, CreatedBooking, NewBooking, confirmation_code};
pub use patch::{BookingPatch, PatchStatus};
pub use payment::{
    NotificationData, PaymentDetails, PaymentItem, PaymentNotification, PaymentPreference,
    PaymentReference, WebhookAck,
};
pub use range::{InvalidRange, StayRange};
pub use room::{AvailableRoom, Room, RoomAvailability, default_rooms};
pub use status::{BookingStatus, UnknownStatus};

/// The JSON schema of an RFC3339 timestamp.
///
/// The schemars crate has no built-in support for the time crate, so every
/// `OffsetDateTime` field points its schema here.
#[cfg(feature = "schemars")]
pub(crate) fn datetime_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
    schemars::json_schema!({
        "type": "string",
        "format": "date-time",
    })
}

#[cfg(feature = "schemars")]
pub(crate) fn optional_datetime_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
    schemars::json_schema!({
        "type": ["string", "null"],
        "format": "date-time",
    })
}
