use anyhow::{Context, Result};
use sqlx::{Executor, Sqlite};

use crate::models::Quote;

/// Inserts `quote` as a new row tagged with `id`. Identical quotes are stored
/// again, never merged.
pub async fn insert_quote<'c, E>(id: &str, quote: &Quote, executor: E) -> Result<()>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO exchange_rate
        (
            id,
            codein,
            name,
            high,
            low,
            var_bid,
            pct_change,
            bid,
            ask,
            timestamp,
            createDate
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(quote.codein())
    .bind(quote.name())
    .bind(quote.high())
    .bind(quote.low())
    .bind(quote.var_bid())
    .bind(quote.pct_change())
    .bind(quote.bid())
    .bind(quote.ask())
    .bind(quote.timestamp())
    .bind(quote.create_date())
    .execute(executor)
    .await
    .context("Failed to insert data into database")?;

    Ok(())
}
