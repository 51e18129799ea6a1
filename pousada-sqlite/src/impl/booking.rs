use crate::{
    Db,
    types::{BookingId, BookingRow, DateTime, StoredStatus},
};
use pousada_core::{
    models::{Booking, BookingChanges, BookingStatus, NewBooking},
    ports::BookingRepository,
};
use time::OffsetDateTime;
use tracing::{Level, event};

impl BookingRepository for Db {
    async fn create_booking(
        &self,
        user_id: &str,
        booking: NewBooking,
        as_of: OffsetDateTime,
    ) -> Result<Booking<Self::BookingId>, Self::Error> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            insert into
                booking (
                    id, user_id, room_id, check_in, check_out, room_type,
                    number_of_rooms, number_of_guests, is_breakfast_included,
                    special_requests, total_price, status, created_at, updated_at
                )
            values
                ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13)
            returning
                *
            "#,
        )
        .bind(BookingId::random())
        .bind(user_id)
        .bind(booking.room_id)
        .bind(DateTime::from(booking.check_in))
        .bind(DateTime::from(booking.check_out))
        .bind(booking.room_type)
        .bind(booking.number_of_rooms)
        .bind(booking.number_of_guests)
        .bind(booking.is_breakfast_included)
        .bind(booking.special_requests)
        .bind(booking.total_price)
        .bind(StoredStatus(BookingStatus::Created))
        .bind(DateTime::from(as_of))
        .fetch_one(&self.writer)
        .await?;

        Ok(row.into())
    }

    async fn get_booking(
        &self,
        booking_id: &Self::BookingId,
    ) -> Result<Option<Booking<Self::BookingId>>, Self::Error> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            select
                *
            from
                booking
            where
                id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&self.reader)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn query_bookings_by_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<Booking<Self::BookingId>>, Self::Error> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            select
                *
            from
                booking
            where
                user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.reader)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn query_bookings_by_room_and_status(
        &self,
        room_id: &str,
        status: BookingStatus,
    ) -> Result<Vec<Booking<Self::BookingId>>, Self::Error> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            select
                *
            from
                booking
            where
                room_id = $1
            and
                status = $2
            "#,
        )
        .bind(room_id)
        .bind(StoredStatus(status))
        .fetch_all(&self.reader)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_booking_by_payment_id(
        &self,
        payment_id: &str,
    ) -> Result<Option<Booking<Self::BookingId>>, Self::Error> {
        let mut rows = sqlx::query_as::<_, BookingRow>(
            r#"
            select
                *
            from
                booking
            where
                payment_id = $1
            order by
                id
            limit
                2
            "#,
        )
        .bind(payment_id)
        .fetch_all(&self.reader)
        .await?;

        if rows.len() > 1 {
            event!(
                Level::WARN,
                payment_id,
                "payment reference is held by more than one booking"
            );
        }

        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0).into())
        })
    }

    async fn update_booking(
        &self,
        booking_id: &Self::BookingId,
        changes: BookingChanges,
        expected: &[BookingStatus],
        as_of: OffsetDateTime,
    ) -> Result<Option<Booking<Self::BookingId>>, Self::Error> {
        let expected = sqlx::types::Json(
            expected
                .iter()
                .map(BookingStatus::as_str)
                .collect::<Vec<_>>(),
        );

        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            update
                booking
            set
                room_id = coalesce($2, room_id),
                check_in = coalesce($3, check_in),
                check_out = coalesce($4, check_out),
                room_type = coalesce($5, room_type),
                number_of_rooms = coalesce($6, number_of_rooms),
                number_of_guests = coalesce($7, number_of_guests),
                is_breakfast_included = coalesce($8, is_breakfast_included),
                special_requests = coalesce($9, special_requests),
                total_price = coalesce($10, total_price),
                status = coalesce($11, status),
                confirmation_code = coalesce(confirmation_code, $12),
                payment_id = coalesce(payment_id, $13),
                updated_at = $14
            where
                id = $1
            and
                status in (select value from json_each($15))
            returning
                *
            "#,
        )
        .bind(booking_id)
        .bind(changes.room_id)
        .bind(changes.check_in.map(DateTime::from))
        .bind(changes.check_out.map(DateTime::from))
        .bind(changes.room_type)
        .bind(changes.number_of_rooms)
        .bind(changes.number_of_guests)
        .bind(changes.is_breakfast_included)
        .bind(changes.special_requests)
        .bind(changes.total_price)
        .bind(changes.status.map(StoredStatus))
        .bind(changes.confirmation_code)
        .bind(changes.payment_id)
        .bind(DateTime::from(as_of))
        .bind(expected)
        .fetch_optional(&self.writer)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn confirm_booking(
        &self,
        booking_id: &Self::BookingId,
        payment_id: &str,
        expected: &[BookingStatus],
        as_of: OffsetDateTime,
    ) -> Result<Option<Booking<Self::BookingId>>, Self::Error> {
        let expected = sqlx::types::Json(
            expected
                .iter()
                .map(BookingStatus::as_str)
                .collect::<Vec<_>>(),
        );

        // instants are compared through julianday, their text does not sort
        // when fractional seconds vary
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            update
                booking
            set
                status = $3,
                payment_id = coalesce(payment_id, $2),
                updated_at = $4
            where
                id = $1
            and
                status in (select value from json_each($5))
            and
                (payment_id is null or payment_id = $2)
            and
                not exists (
                    select
                        1
                    from
                        booking as other
                    where
                        other.room_id = booking.room_id
                    and
                        other.status = $3
                    and
                        other.id <> booking.id
                    and
                        julianday(other.check_in) < julianday(booking.check_out)
                    and
                        julianday(booking.check_in) < julianday(other.check_out)
                )
            returning
                *
            "#,
        )
        .bind(booking_id)
        .bind(payment_id)
        .bind(StoredStatus(BookingStatus::Confirmed))
        .bind(DateTime::from(as_of))
        .bind(expected)
        .fetch_optional(&self.writer)
        .await?;

        Ok(row.map(Into::into))
    }
}
