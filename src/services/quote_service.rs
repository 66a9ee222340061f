use std::future::Future;

use reqwest::Client;
use sqlx::{Pool, Sqlite};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    api::awesome, config::ServerConfig, db::write::insert_quote, error::AppError, models::Quote,
};

/// Fetches quotes from the upstream API and records each one in the database.
///
/// Cheap to clone; the HTTP client and the pool are shared handles.
#[derive(Clone, Debug)]
pub struct QuoteService {
    client: Client,
    connection: Pool<Sqlite>,
    config: ServerConfig,
}

impl QuoteService {
    pub fn new(config: ServerConfig, connection: Pool<Sqlite>) -> Self {
        Self {
            client: Client::new(),
            connection,
            config,
        }
    }

    /// Serves one quote request.
    ///
    /// The request first waits `gate_delay`; if `cancelled` resolves before
    /// then, nothing is fetched or stored and a 408 is returned. Otherwise the
    /// upstream fetch runs under `fetch_timeout`, which starts when the gate
    /// opens, so with the defaults a request may take up to
    /// `gate_delay + fetch_timeout` (about 400 ms) before the insert. That is
    /// longer than the client's default 300 ms, so a slow upstream shows up
    /// client-side as a timeout rather than a 408.
    ///
    /// Waiting for a database connection is bounded by `insert_timeout` and
    /// still honors `cancelled`. Once the insert has started it always runs to
    /// completion, so a quote is returned exactly when its row was stored.
    pub async fn get_quote<F>(&self, cancelled: F) -> Result<Quote, AppError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(cancelled);

        tokio::select! {
            biased;
            _ = &mut cancelled => {
                debug!("Request canceled before the upstream call");
                return Err(AppError::request_timeout());
            }
            _ = tokio::time::sleep(*self.config.gate_delay()) => {}
        }

        let fetch = tokio::time::timeout(
            *self.config.fetch_timeout(),
            awesome::get_quote(
                &self.client,
                self.config.upstream_url(),
                self.config.currency_pair(),
            ),
        );
        let quote = tokio::select! {
            biased;
            _ = &mut cancelled => return Err(AppError::request_timeout()),
            res = fetch => match res {
                Ok(quote) => quote?,
                Err(_) => return Err(AppError::request_timeout()),
            },
        };

        let acquire =
            tokio::time::timeout(*self.config.insert_timeout(), self.connection.acquire());
        let mut conn = tokio::select! {
            biased;
            _ = &mut cancelled => return Err(AppError::request_timeout()),
            res = acquire => match res {
                Ok(Ok(conn)) => conn,
                Ok(Err(e)) => {
                    return Err(AppError::internal(format!(
                        "Failed to insert data into database: {}",
                        e
                    )));
                }
                Err(_) => {
                    return Err(AppError::internal(
                        "Failed to insert data into database: timed out waiting for a connection",
                    ));
                }
            },
        };

        let id = Uuid::new_v4().to_string();
        insert_quote(&id, &quote, &mut *conn).await?;

        info!(id = %id, bid = %quote.bid(), "Stored {} quote", self.config.currency_pair());

        Ok(quote)
    }
}
