//! Application implementation with JWT-based sessions.

use headers::{Authorization, authorization::Bearer};
use jwt_simple::prelude::{HS256Key, MACLike, NoCustomClaims};
use pousada_core::{
    models::{Room, confirmation_code},
    ports::Application,
};
use pousada_mercadopago::MercadoPago;
use pousada_sqlite::Db;
use rand::RngCore;
use std::sync::Arc;
use time::OffsetDateTime;

/// The booking server, combining the SQLite store, the MercadoPago client
/// and the room catalog.
///
/// Every request is authenticated with an HS256 JWT whose `sub` claim names
/// the user.
#[derive(Clone)]
pub struct PousadaApp {
    /// Database connection for persistent storage
    pub db: Db,
    /// The payment provider
    pub payments: MercadoPago,
    /// The rooms of the property
    pub rooms: Arc<[Room]>,
    /// HMAC key for JWT token verification
    pub key: HS256Key,
}

impl PousadaApp {
    /// Verify the bearer token and extract its subject.
    fn subject(&self, context: &Authorization<Bearer>) -> Option<String> {
        let token = context.0.token();
        self.key
            .verify_token::<NoCustomClaims>(token, None)
            .ok()?
            .subject
            .filter(|sub| !sub.is_empty())
    }
}

impl Application for PousadaApp {
    type Context = Authorization<Bearer>;
    type Repository = Db;
    type Payments = MercadoPago;

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
        confirmation_code(now, rand::rng().next_u64())
    }

    fn verify_payments(&self) -> bool {
        self.payments.config().verify_payments
    }

    async fn authenticate(&self, context: &Self::Context) -> Option<String> {
        self.subject(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jwt_simple::prelude::{Claims, Clock, Duration};
    use pousada_core::models::default_rooms;
    use pousada_mercadopago::config::MercadoPagoConfig;
    use pousada_sqlite::config::SqliteConfig;

    async fn app(key: HS256Key) -> PousadaApp {
        PousadaApp {
            db: Db::open(&SqliteConfig::default()).await.unwrap(),
            payments: MercadoPago::new(MercadoPagoConfig::default()).unwrap(),
            rooms: default_rooms().into(),
            key,
        }
    }

    fn bearer(token: &str) -> Authorization<Bearer> {
        Authorization::bearer(token).unwrap()
    }

    #[tokio::test]
    async fn the_subject_claim_names_the_user() {
        let key = HS256Key::generate();
        let app = app(key.clone()).await;

        let claims = Claims::create(Duration::from_hours(1)).with_subject("alice");
        let token = key.authenticate(claims).unwrap();
        assert_eq!(app.authenticate(&bearer(&token)).await.as_deref(), Some("alice"));

        let anonymous = key
            .authenticate(Claims::create(Duration::from_hours(1)))
            .unwrap();
        assert_eq!(app.authenticate(&bearer(&anonymous)).await, None);
    }

    #[tokio::test]
    async fn foreign_and_premature_tokens_are_rejected() {
        let app = app(HS256Key::generate()).await;

        let other = HS256Key::generate();
        let claims = Claims::create(Duration::from_hours(1)).with_subject("alice");
        let forged = other.authenticate(claims).unwrap();
        assert_eq!(app.authenticate(&bearer(&forged)).await, None);

        let claims = Claims::create(Duration::from_hours(1))
            .with_subject("alice")
            .invalid_before(Clock::now_since_epoch() + Duration::from_days(1));
        let early = app.key.authenticate(claims).unwrap();
        assert_eq!(app.authenticate(&bearer(&early)).await, None);
    }

    #[tokio::test]
    async fn confirmation_codes_are_fresh() {
        let app = app(HS256Key::generate()).await;
        let now = OffsetDateTime::now_utc();
        let first = app.generate_confirmation_code(now);
        assert!(first.starts_with("RES-"));
        assert_ne!(first, app.generate_confirmation_code(now));
    }
}
