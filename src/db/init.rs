use std::path::Path;

use anyhow::{Context, Result};
use sqlx::{
    Pool, Sqlite,
    sqlite::{SqliteConnectOptions, SqlitePool},
};
use tracing::{debug, info};

pub const EXCHANGE_RATE_TABLE: &str = "exchange_rate";

/// Creates an empty database file at `path` unless one is already there.
/// Returns `true` when the file was created.
pub async fn create_db_file_if_not_exists(path: &Path) -> Result<bool> {
    if tokio::fs::try_exists(path)
        .await
        .with_context(|| format!("Failed to check database file {}", path.display()))?
    {
        return Ok(false);
    }

    tokio::fs::File::create(path)
        .await
        .with_context(|| format!("Failed to create database file {}", path.display()))?;
    info!("Created database file {}", path.display());

    Ok(true)
}

pub async fn connect(path: &Path) -> Result<Pool<Sqlite>> {
    create_db_file_if_not_exists(path).await?;

    let db_connect_options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);

    SqlitePool::connect_with(db_connect_options)
        .await
        .with_context(|| format!("Failed to open database {}", path.display()))
}

pub async fn table_exists(connection: &Pool<Sqlite>, table_name: &str) -> Result<bool> {
    let row = sqlx::query(
        r#"
        SELECT name FROM sqlite_master
        WHERE type = 'table' AND name = ?
        "#,
    )
    .bind(table_name)
    .fetch_optional(connection)
    .await
    .with_context(|| format!("Failed to look up table '{}'", table_name))?;

    Ok(row.is_some())
}

/// Creates the `exchange_rate` table if it is missing. Returns `true` when the
/// table was created by this call.
pub async fn create_exchange_rate_table(connection: &Pool<Sqlite>) -> Result<bool> {
    if table_exists(connection, EXCHANGE_RATE_TABLE).await? {
        debug!("Table '{}' already exists", EXCHANGE_RATE_TABLE);
        return Ok(false);
    }

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS exchange_rate (
            id VARCHAR(255),
            codein VARCHAR(255),
            name VARCHAR(255),
            high VARCHAR(255),
            low VARCHAR(255),
            var_bid VARCHAR(255),
            pct_change VARCHAR(255),
            bid VARCHAR(255),
            ask VARCHAR(255),
            timestamp VARCHAR(255),
            createDate VARCHAR(255)
        )
        "#,
    )
    .execute(connection)
    .await
    .context("Failed to create table 'exchange_rate'")?;
    info!("Created table '{}'", EXCHANGE_RATE_TABLE);

    Ok(true)
}

/// Prepares the schema. Run once before the server starts taking requests.
pub async fn bootstrap(connection: &Pool<Sqlite>) -> Result<()> {
    create_exchange_rate_table(connection).await?;
    Ok(())
}
