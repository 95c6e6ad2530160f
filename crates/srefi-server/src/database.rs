use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;

/// Stands in for "never" where the pool only accepts a finite duration.
const KEEP_FOREVER: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

pub fn connect_options(config: &DatabaseConfig) -> ConnectOptions {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.pool_size())
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    if config.is_memory() {
        // an in-memory database lives only as long as its connection, so
        // the pool must never close or recycle it
        options
            .min_connections(1)
            .idle_timeout(KEEP_FOREVER)
            .max_lifetime(KEEP_FOREVER);
    }

    options
}

/// Connect and make sure the schema exists.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection> {
    let db = Database::connect(connect_options(config)).await?;
    srefi_core::entity::setup_schema(&db).await?;

    info!(url = %config.url, pool = config.pool_size(), "Database connected");
    Ok(db)
}
