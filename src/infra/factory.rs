use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::services::generation::GenerationEngine;
use crate::infra::repositories::{
    sqlite_session_repo::SqliteSessionRepo, sqlite_template_repo::SqliteTemplateRepo,
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    info!("Initializing SQLite connection...");

    let mut opts = SqliteConnectOptions::from_str(&config.database_url)
        .expect("Invalid SQLite URL")
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);
    opts = opts
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await
        .expect("Failed to connect to SQLite");

    run_sqlite_migrations(&pool).await;

    build_state(config, pool)
}

pub fn build_state(config: &Config, pool: SqlitePool) -> AppState {
    let template_repo = Arc::new(SqliteTemplateRepo::new(pool.clone()));
    let session_repo = Arc::new(SqliteSessionRepo::new(pool));

    let generation_engine = Arc::new(GenerationEngine::new(
        template_repo.clone(),
        session_repo.clone(),
        config.max_meetings_per_generation,
    ));

    AppState {
        config: config.clone(),
        template_repo,
        session_repo,
        generation_engine,
    }
}

pub async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
