use super::{BookingStatus, InvalidRange, PaymentPreference, StayRange};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A booking of one room type over a stay, owned by a single user.
///
/// The identifier is assigned by the repository on creation and is opaque
/// to the core; adapters choose the concrete type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Booking<BookingId> {
    /// The store-assigned identifier
    pub id: BookingId,
    /// The owning user
    pub user_id: String,
    /// The booked room
    pub room_id: String,
    /// The first instant of the stay
    #[serde(with = "time::serde::rfc3339")]
    #[cfg_attr(
        feature = "schemars",
        schemars(schema_with = "crate::models::datetime_schema")
    )]
    pub check_in: OffsetDateTime,
    /// The first instant after the stay
    #[serde(with = "time::serde::rfc3339")]
    #[cfg_attr(
        feature = "schemars",
        schemars(schema_with = "crate::models::datetime_schema")
    )]
    pub check_out: OffsetDateTime,
    /// A free-form label such as "Standard" or "Deluxe"
    pub room_type: String,
    /// How many rooms are booked (at least 1)
    pub number_of_rooms: u32,
    /// How many guests are staying (at least 1)
    pub number_of_guests: u32,
    /// Whether breakfast is part of the booking
    pub is_breakfast_included: bool,
    /// Free-text requests from the guest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    /// The total price of the stay
    pub total_price: f64,
    /// Where the booking is in its lifecycle
    pub status: BookingStatus,
    /// The human-shareable code, assigned once at creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_code: Option<String>,
    /// The payment provider's reference, assigned at most once
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    /// When the booking was made
    #[serde(with = "time::serde::rfc3339")]
    #[cfg_attr(
        feature = "schemars",
        schemars(schema_with = "crate::models::datetime_schema")
    )]
    pub created_at: OffsetDateTime,
    /// When the booking was last written
    #[serde(with = "time::serde::rfc3339")]
    #[cfg_attr(
        feature = "schemars",
        schemars(schema_with = "crate::models::datetime_schema")
    )]
    pub updated_at: OffsetDateTime,
}

impl<BookingId> Booking<BookingId> {
    /// The stay covered by this booking.
    ///
    /// Stored bookings always satisfy `check_in < check_out`, but documents
    /// written by other tools are not trusted blindly.
    pub fn stay(&self) -> Result<StayRange, InvalidRange> {
        StayRange::new(self.check_in, self.check_out)
    }
}

/// The request body for creating a booking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    /// The room to book, e.g. `standard-101`
    pub room_id: String,
    /// The first instant of the stay
    #[serde(with = "time::serde::rfc3339")]
    #[cfg_attr(
        feature = "schemars",
        schemars(schema_with = "crate::models::datetime_schema")
    )]
    pub check_in: OffsetDateTime,
    /// The first instant after the stay
    #[serde(with = "time::serde::rfc3339")]
    #[cfg_attr(
        feature = "schemars",
        schemars(schema_with = "crate::models::datetime_schema")
    )]
    pub check_out: OffsetDateTime,
    /// How many rooms to book
    pub number_of_rooms: u32,
    /// Whether breakfast is included
    pub is_breakfast_included: bool,
    /// Free-text requests from the guest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    /// How many guests are staying
    pub number_of_guests: u32,
    /// The total price of the stay
    pub total_price: f64,
    /// The room type label
    pub room_type: String,
}

/// The outcome of a successful booking request.
///
/// A missing payment preference means the provider could not be reached;
/// the booking itself is still valid and payment can be retried.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreatedBooking<BookingId> {
    /// The stored booking
    pub booking: Booking<BookingId>,
    /// The hosted-payment page for the booking, if one could be created
    pub payment_preference: Option<PaymentPreference>,
}

/// A partial write against a stored booking.
///
/// Every `None` leaves the stored value untouched. The repository never
/// overwrites a confirmation code or payment reference that is already set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BookingChanges {
    /// A new room
    pub room_id: Option<String>,
    /// A new check-in
    pub check_in: Option<OffsetDateTime>,
    /// A new check-out
    pub check_out: Option<OffsetDateTime>,
    /// A new room type label
    pub room_type: Option<String>,
    /// A new room count
    pub number_of_rooms: Option<u32>,
    /// A new guest count
    pub number_of_guests: Option<u32>,
    /// A new breakfast flag
    pub is_breakfast_included: Option<bool>,
    /// A new special request
    pub special_requests: Option<String>,
    /// A new total price
    pub total_price: Option<f64>,
    /// A new status
    pub status: Option<BookingStatus>,
    /// The confirmation code, if not yet assigned
    pub confirmation_code: Option<String>,
    /// The payment reference, if not yet assigned
    pub payment_id: Option<String>,
}

impl BookingChanges {
    /// A change that only moves the booking to `status`
    pub fn status(status: BookingStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

fn base36(mut value: u64, out: &mut Vec<u8>) {
    let start = out.len();
    loop {
        out.push(BASE36[(value % 36) as usize]);
        value /= 36;
        if value == 0 {
            break;
        }
    }
    out[start..].reverse();
}

/// Build a human-shareable confirmation code of the form `RES-<time>-<noise>`.
///
/// The time component is the unix timestamp in milliseconds and the noise is
/// five base-36 digits taken from `entropy`, both upper case. The code is not
/// cryptographically significant; it only needs to be unique enough for the
/// booking volume of a single property.
pub fn confirmation_code(now: OffsetDateTime, entropy: u64) -> String {
    let millis = (now.unix_timestamp_nanos() / 1_000_000).max(0) as u64;

    let mut code = b"RES-".to_vec();
    base36(millis, &mut code);
    code.push(b'-');
    let mut noise = entropy % 36u64.pow(5);
    for _ in 0..5 {
        code.push(BASE36[(noise % 36) as usize]);
        noise /= 36;
    }

    // every byte pushed above comes from the ASCII alphabet
    String::from_utf8(code).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn confirmation_codes_have_the_documented_shape() {
        let now = datetime!(2024-05-15 14:00 UTC);
        let code = confirmation_code(now, 0xdead_beef);
        let parts: Vec<&str> = code.split('-').collect();

        assert_eq!(parts.len(), 3, "{code}");
        assert_eq!(parts[0], "RES");
        assert_eq!(
            u64::from_str_radix(parts[1], 36).unwrap(),
            1_715_781_600_000,
            "time component is the unix time in milliseconds"
        );
        assert_eq!(parts[2].len(), 5);
        assert!(
            code.chars()
                .all(|c| c == '-' || c.is_ascii_digit() || c.is_ascii_uppercase())
        );
    }

    #[test]
    fn confirmation_codes_differ_by_entropy() {
        let now = datetime!(2024-05-15 14:00 UTC);
        assert_ne!(confirmation_code(now, 1), confirmation_code(now, 2));
        assert_eq!(confirmation_code(now, 7), confirmation_code(now, 7));
    }

    #[test]
    fn bookings_use_camel_case_on_the_wire() {
        let booking = Booking {
            id: "abc".to_owned(),
            user_id: "user-1".to_owned(),
            room_id: "standard-101".to_owned(),
            check_in: datetime!(2024-05-15 14:00 UTC),
            check_out: datetime!(2024-05-18 10:00 UTC),
            room_type: "Standard".to_owned(),
            number_of_rooms: 1,
            number_of_guests: 2,
            is_breakfast_included: true,
            special_requests: None,
            total_price: 600.0,
            status: BookingStatus::Created,
            confirmation_code: Some("RES-1-ABCDE".to_owned()),
            payment_id: None,
            created_at: datetime!(2024-05-01 09:00 UTC),
            updated_at: datetime!(2024-05-01 09:00 UTC),
        };

        let json = serde_json::to_value(&booking).unwrap();
        assert_eq!(json["userId"], "user-1");
        assert_eq!(json["checkIn"], "2024-05-15T14:00:00Z");
        assert_eq!(json["isBreakfastIncluded"], true);
        assert_eq!(json["status"], "created");
        assert!(json.get("paymentId").is_none());
        assert!(json.get("specialRequests").is_none());
    }
}
