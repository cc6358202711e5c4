use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

pub type Db = PgPool;

/// Build the shared connection pool.
pub async fn connect(database_url: &str, max_connections: u32) -> sqlx::Result<Db> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .idle_timeout(Some(Duration::from_secs(600)))
        .max_lifetime(Some(Duration::from_secs(1800)))
        .connect(database_url)
        .await?;

    tracing::info!(
        "Connected to Postgres with max {} connections",
        max_connections
    );

    Ok(pool)
}
