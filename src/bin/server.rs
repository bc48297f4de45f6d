use std::sync::Arc;

use anyhow::Context;
use trivia_api::config::Settings;
use trivia_api::db::{run_migrations, SqliteStore};
use trivia_api::server::run_server;
use trivia_api::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let settings = Settings::load().context("Failed to load configuration")?;
    let pool = settings
        .database
        .connect()
        .await
        .context("Cannot connect to DB")?;

    tracing::info!("Running db migrations...");
    run_migrations(&pool).await?;

    run_server(&settings.application, Arc::new(SqliteStore::new(pool))).await
}
