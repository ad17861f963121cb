//! JoyFormula backend entrypoint.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use joyformula::adapters::ai::build_provider;
use joyformula::adapters::http::{app_router, AppState};
use joyformula::adapters::postgres::{
    PostgresCardRepository, PostgresInsightRepository, PostgresSessionRepository,
    PostgresUserRepository,
};
use joyformula::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    config.validate()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let provider = build_provider(config.ai.provider, &config.ai)?;
    tracing::info!(
        provider = %provider.info().name,
        model = %provider.info().model,
        "AI provider ready"
    );

    let state = AppState::new(
        Arc::new(PostgresUserRepository::new(pool.clone())),
        Arc::new(PostgresSessionRepository::new(pool.clone())),
        Arc::new(PostgresCardRepository::new(pool.clone())),
        Arc::new(PostgresInsightRepository::new(pool)),
        provider,
        config.ai.clone(),
    );

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "JoyFormula API listening");

    axum::serve(listener, app_router(state)).await?;
    Ok(())
}
