#![allow(dead_code)]

use pousada_core::{
    models::{
        NewBooking, PaymentDetails, PaymentItem, PaymentPreference, Room, confirmation_code,
        default_rooms,
    },
    ports::{Application, PaymentGateway},
};
use pousada_sqlite::{Db, config::SqliteConfig};
use std::sync::Mutex;
use time::{Duration, OffsetDateTime, macros::datetime};

#[derive(Debug, thiserror::Error)]
#[error("payment provider unavailable")]
pub struct Unavailable;

/// A payment provider that records what it was asked for.
#[derive(Default)]
pub struct StubPayments {
    pub offline: bool,
    pub payment_status: Option<String>,
    pub external_reference: Option<String>,
    pub preferences: Mutex<Vec<(String, Vec<PaymentItem>)>>,
}

impl PaymentGateway for StubPayments {
    type Error = Unavailable;

    fn currency(&self) -> &str {
        "BRL"
    }

    async fn create_payment_preference(
        &self,
        items: Vec<PaymentItem>,
        booking_id: &str,
        _user_id: &str,
    ) -> Result<PaymentPreference, Self::Error> {
        if self.offline {
            return Err(Unavailable);
        }
        self.preferences
            .lock()
            .unwrap()
            .push((booking_id.to_owned(), items));
        Ok(PaymentPreference {
            id: format!("pref-{booking_id}"),
            init_point: Some(format!("https://pay.example/checkout/{booking_id}")),
            sandbox_init_point: None,
        })
    }

    async fn get_payment(&self, payment_id: &str) -> Result<PaymentDetails, Self::Error> {
        if self.offline {
            return Err(Unavailable);
        }
        Ok(PaymentDetails {
            id: payment_id.to_owned(),
            status: self
                .payment_status
                .clone()
                .unwrap_or_else(|| "approved".to_owned()),
            external_reference: self.external_reference.clone(),
        })
    }
}

pub struct TestApp {
    pub db: Db,
    pub payments: StubPayments,
    pub rooms: Vec<Room>,
    pub verify_payments: bool,
}

impl TestApp {
    pub async fn new() -> anyhow::Result<Self> {
        Self::with_payments(StubPayments::default()).await
    }

    pub async fn with_payments(payments: StubPayments) -> anyhow::Result<Self> {
        Ok(Self {
            db: Db::open(&SqliteConfig::default()).await?,
            payments,
            rooms: default_rooms(),
            verify_payments: false,
        })
    }
}

impl Application for TestApp {
    type Context = String;
    type Repository = Db;
    type Payments = StubPayments;

    fn database(&self) -> &Self::Repository {
        &self.db
    }

    fn payments(&self) -> &Self::Payments {
        &self.payments
    }

    fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }

    fn generate_confirmation_code(&self, now: OffsetDateTime) -> String {
        confirmation_code(now, uuid::Uuid::new_v4().as_u128() as u64)
    }

    fn verify_payments(&self) -> bool {
        self.verify_payments
    }

    async fn authenticate(&self, context: &Self::Context) -> Option<String> {
        (!context.is_empty()).then(|| context.clone())
    }
}

/// The first night of every stay in these tests.
pub const CHECK_IN: OffsetDateTime = datetime!(2030-05-15 14:00 UTC);

/// A booking of `room_id` starting `offset` days after [`CHECK_IN`] for `nights` nights.
pub fn stay(room_id: &str, offset: i64, nights: i64) -> NewBooking {
    let check_in = CHECK_IN + Duration::days(offset);
    NewBooking {
        room_id: room_id.to_owned(),
        check_in,
        check_out: check_in + Duration::days(nights),
        number_of_rooms: 1,
        is_breakfast_included: true,
        special_requests: None,
        number_of_guests: 2,
        total_price: 200.0 * nights as f64,
        room_type: "Standard".to_owned(),
    }
}
