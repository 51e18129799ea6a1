//! Type definitions for the SQLite implementation.
//!
//! The public types are the booking identifier and the timestamp wrapper the
//! store reads and writes. The row type maps a `booking` row onto the core
//! [`Booking`] document.

use pousada_core::models::{Booking, BookingStatus};

mod datetime;
pub use datetime::DateTime;

mod ids;
pub use ids::BookingId;

mod status;
pub(crate) use status::StoredStatus;

#[derive(sqlx::FromRow)]
pub(crate) struct BookingRow {
    pub id: BookingId,
    pub user_id: String,
    pub room_id: String,
    pub check_in: DateTime,
    pub check_out: DateTime,
    pub room_type: String,
    pub number_of_rooms: u32,
    pub number_of_guests: u32,
    pub is_breakfast_included: bool,
    pub special_requests: Option<String>,
    pub total_price: f64,
    pub status: StoredStatus,
    pub confirmation_code: Option<String>,
    pub payment_id: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl From<BookingRow> for Booking<BookingId> {
    fn from(row: BookingRow) -> Self {
        Booking {
            id: row.id,
            user_id: row.user_id,
            room_id: row.room_id,
            check_in: row.check_in.into(),
            check_out: row.check_out.into(),
            room_type: row.room_type,
            number_of_rooms: row.number_of_rooms,
            number_of_guests: row.number_of_guests,
            is_breakfast_included: row.is_breakfast_included,
            special_requests: row.special_requests,
            total_price: row.total_price,
            status: BookingStatus::from(row.status),
            confirmation_code: row.confirmation_code,
            payment_id: row.payment_id,
            created_at: row.created_at.into(),
            updated_at: row.updated_at.into(),
        }
    }
}
