use jwt_simple::prelude::HS256Key;
use pousada::{AppConfig, Cli, impls::PousadaApp};
use pousada_axum::{schema, start_server};
use pousada_mercadopago::MercadoPago;
use pousada_sqlite::Db;
use std::fs::File;
use tracing::{Level, event};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Every crate in the workspace reports through `tracing`; this is the
    // only place a subscriber is installed.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::import()?;

    // If requested, dump the schema and exit.
    if let Some(path) = &cli.schema {
        serde_json::to_writer_pretty(File::create(path)?, &schema::<PousadaApp>())?;
        return Ok(());
    }

    let key = HS256Key::from_bytes(cli.secret.as_bytes());

    let AppConfig {
        server,
        database,
        payments,
        rooms,
    } = AppConfig::load(&cli)?;

    if payments.access_token.is_none() {
        event!(
            Level::WARN,
            "no payment provider access token, bookings will be created without a checkout"
        );
    }

    let db = Db::open(&database).await?;
    let app = PousadaApp {
        db,
        payments: MercadoPago::new(payments)?,
        rooms: rooms.into(),
        key,
    };

    start_server(server, app).await?;
    Ok(())
}
