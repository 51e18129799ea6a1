use super::StubPayments;
use headers::{Authorization, authorization::Bearer};
use pousada_core::{
    models::{Room, confirmation_code, default_rooms},
    ports::Application,
};
use pousada_sqlite::Db;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use time::OffsetDateTime;

#[derive(Clone)]
pub struct TestApp {
    pub db: Db,
    pub payments: Arc<StubPayments>,
    pub rooms: Arc<[Room]>,
    pub codes: Arc<AtomicU64>,
}

impl TestApp {
    pub fn new(db: Db) -> Self {
        Self {
            db,
            payments: Arc::new(StubPayments::default()),
            rooms: default_rooms().into(),
            codes: Arc::default(),
        }
    }
}

impl Application for TestApp {
    // The bearer token is simply the user id in plain text
    type Context = Authorization<Bearer>;
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
        confirmation_code(now, self.codes.fetch_add(1, Ordering::Relaxed))
    }

    async fn authenticate(&self, context: &Self::Context) -> Option<String> {
        let token = context.token();
        (!token.is_empty() && token != "invalid").then(|| token.to_owned())
    }
}
