use std::path::Path;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use tracing::info;

use crate::error::Result;

pub type DbPool = Pool<Sqlite>;

/// Opens the SQLite database at `path`. The file must already exist since it
/// holds the source tables.
pub async fn connect(path: &Path) -> Result<DbPool> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(false);
    let pool = connect_with(options).await?;
    info!(database = %path.display(), "Connected to database");
    Ok(pool)
}

/// Single-connection pool: the run is one writer, and an in-memory database
/// only lives as long as its connection.
pub async fn connect_with(options: SqliteConnectOptions) -> Result<DbPool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    Ok(pool)
}
