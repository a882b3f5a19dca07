use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection};
use tracing::info;

use crate::config::DatabaseConfig;

const SQLITE_BUSY_TIMEOUT_MS: u64 = 5_000;

pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(cfg.url.clone());
    // Each connection to an in-memory sqlite url opens its own empty database.
    let (max_connections, min_idle) = if is_sqlite_memory(&cfg.url) {
        (1, 1)
    } else {
        (cfg.max_connections, cfg.min_idle)
    };
    options
        .max_connections(max_connections)
        .min_connections(min_idle)
        .connect_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    post_connect(&db).await?;

    if cfg.sync_schema {
        info!("syncing database schema from entities");
        db.get_schema_registry("venue_booking::db::entities::*")
            .sync(&db)
            .await?;
    }
    Ok(db)
}

async fn post_connect(db: &DatabaseConnection) -> anyhow::Result<()> {
    if db.get_database_backend() == DatabaseBackend::Sqlite {
        db.execute_unprepared("PRAGMA foreign_keys = ON").await?;
        db.execute_unprepared(&format!("PRAGMA busy_timeout = {SQLITE_BUSY_TIMEOUT_MS}"))
            .await?;
    }
    Ok(())
}

fn is_sqlite_memory(url: &str) -> bool {
    let url = url.trim().to_ascii_lowercase();
    url.starts_with("sqlite:") && url.contains(":memory:")
}
