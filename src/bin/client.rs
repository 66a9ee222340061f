use anyhow::Result;
use cotacao::{config::ClientConfig, logging, services::QuoteClient};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    logging::init_tracing();

    let config = ClientConfig::from_env()?;
    QuoteClient::new(config)?.run().await
}
