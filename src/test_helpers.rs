use std::sync::Arc;

use axum::Router;

use crate::{
    config::{AppConfig, DatabaseConfig},
    db::connection,
    routes::app,
    state::AppState,
};

/// State backed by a fresh in-memory sqlite database with the schema synced.
pub async fn test_state() -> Arc<AppState> {
    let cfg = AppConfig {
        database: DatabaseConfig::with_url("sqlite::memory:"),
        ..AppConfig::default()
    };
    let db = connection::connect(&cfg.database)
        .await
        .expect("connect to in-memory sqlite");
    AppState::new(cfg, db)
}

/// The full application router over [`test_state`], layers included.
pub async fn test_app() -> (Arc<AppState>, Router) {
    let state = test_state().await;
    let router = app(Arc::clone(&state));
    (state, router)
}
