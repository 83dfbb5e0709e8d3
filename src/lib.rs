pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;

use std::str::FromStr;

use anyhow::Context;
use axum::Router;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use config::Config;
use constants::{API_NAME, API_PREFIX};
use repository::CarRepository;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Builds the application router with every route mounted under `/api/v1`.
pub fn app(repository: CarRepository) -> Router {
    Router::new()
        .nest(
            API_PREFIX,
            handlers::car::router().merge(handlers::health::router()),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(repository)
}

/// Opens the connection pool and brings the schema up to date.
pub async fn connect(config: &Config) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .context("Invalid DATABASE_URL")?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;

    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    tracing::info!("{} Connected to database", API_NAME);

    Ok(pool)
}
