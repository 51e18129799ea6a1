//! [`BookingRepository`](pousada_core::ports::BookingRepository) for the
//! SQLite database.

use crate::{Db, types::BookingId};
use pousada_core::ports::Repository;

mod booking;

impl Repository for Db {
    type Error = sqlx::Error;
    type BookingId = BookingId;
}
