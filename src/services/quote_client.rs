use std::path::Path;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::info;

use crate::config::ClientConfig;

pub struct QuoteClient {
    client: Client,
    config: ClientConfig,
}

impl QuoteClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(*config.timeout())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, config })
    }

    /// Asks the quote service for the current bid and returns the raw body.
    pub async fn fetch_bid(&self) -> Result<String> {
        let url = self.config.server_url();
        let res = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to reach quote service at {}", url))?;

        let res = res
            .error_for_status()
            .context("Quote service returned an error")?;

        res.text()
            .await
            .context("Failed to read quote service response")
    }

    /// Fetches the bid and saves it to the configured output file. The file is
    /// only touched once the fetch has succeeded.
    pub async fn run(&self) -> Result<()> {
        let body = self.fetch_bid().await?;
        write_quote_file(self.config.output_path(), self.config.label(), &body).await?;
        info!("Saved quote to {}", self.config.output_path().display());
        Ok(())
    }
}

/// Replaces the contents of `path` with a single `"<label>: <body>"` line.
pub async fn write_quote_file(path: &Path, label: &str, body: &str) -> Result<()> {
    let line = format!("{}: {}\n", label, body.trim_end_matches(['\r', '\n']));
    tokio::fs::write(path, line)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}
