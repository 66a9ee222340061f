use anyhow::{Context, Result};
use sqlx::{Pool, Row, Sqlite, sqlite::SqliteRow};

use crate::models::ExchangeRate;

pub fn parse_string_from_row(row: &SqliteRow, column: &str) -> Result<String> {
    row.try_get::<String, _>(column)
        .with_context(|| format!("Failed to parse String from column '{}'", column))
}

pub fn parse_exchange_rate(row: SqliteRow) -> Result<ExchangeRate> {
    Ok(ExchangeRate::new(
        parse_string_from_row(&row, "id")?,
        parse_string_from_row(&row, "codein")?,
        parse_string_from_row(&row, "name")?,
        parse_string_from_row(&row, "high")?,
        parse_string_from_row(&row, "low")?,
        parse_string_from_row(&row, "var_bid")?,
        parse_string_from_row(&row, "pct_change")?,
        parse_string_from_row(&row, "bid")?,
        parse_string_from_row(&row, "ask")?,
        parse_string_from_row(&row, "timestamp")?,
        parse_string_from_row(&row, "createDate")?,
    ))
}

pub async fn fetch_exchange_rates(connection: &Pool<Sqlite>) -> Result<Vec<ExchangeRate>> {
    let rows = sqlx::query("SELECT * FROM exchange_rate ORDER BY rowid")
        .fetch_all(connection)
        .await
        .context("Failed to read exchange rates")?;

    rows.into_iter().map(parse_exchange_rate).collect()
}
