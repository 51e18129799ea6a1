use super::{BookingChanges, BookingStatus};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The only status an owner may request through an update
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum PatchStatus {
    /// Cancel the booking as part of the update
    Cancelled,
}

/// The request body for updating a booking.
///
/// Enumerates exactly the fields an owner may change; anything else in the
/// payload is rejected during deserialization.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BookingPatch {
    /// Move the booking to another room
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    /// Change the check-in
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(
        feature = "schemars",
        schemars(schema_with = "crate::models::optional_datetime_schema")
    )]
    pub check_in: Option<OffsetDateTime>,
    /// Change the check-out
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(
        feature = "schemars",
        schemars(schema_with = "crate::models::optional_datetime_schema")
    )]
    pub check_out: Option<OffsetDateTime>,
    /// Change the room count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_rooms: Option<u32>,
    /// Change the breakfast flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_breakfast_included: Option<bool>,
    /// Change the special request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    /// Change the guest count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_guests: Option<u32>,
    /// Change the total price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
    /// Change the room type label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    /// Cancel the booking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PatchStatus>,
}

impl BookingPatch {
    /// Whether applying the patch may move the booking in time or space
    pub fn moves_stay(&self) -> bool {
        self.room_id.is_some() || self.check_in.is_some() || self.check_out.is_some()
    }

    /// Whether the patch carries no change at all
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<BookingPatch> for BookingChanges {
    fn from(patch: BookingPatch) -> Self {
        Self {
            room_id: patch.room_id,
            check_in: patch.check_in,
            check_out: patch.check_out,
            room_type: patch.room_type,
            number_of_rooms: patch.number_of_rooms,
            number_of_guests: patch.number_of_guests,
            is_breakfast_included: patch.is_breakfast_included,
            special_requests: patch.special_requests,
            total_price: patch.total_price,
            status: patch.status.map(|PatchStatus::Cancelled| BookingStatus::Cancelled),
            confirmation_code: None,
            payment_id: None,
        }
    }
}
