use anyhow::{Context, Result};
use cotacao::{app::App, config::ServerConfig, db, logging, services::QuoteService};
use tokio::{net::TcpListener, sync::watch};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    logging::init_tracing();

    let config = ServerConfig::from_env()?;

    let connection = db::init::connect(config.database_path()).await?;
    db::init::bootstrap(&connection).await?;

    let listener = TcpListener::bind(config.listen_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr()))?;

    let service = QuoteService::new(config, connection);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let shutdown_signal = async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Shutting down");
        let _ = shutdown_tx.send(true);
    };

    App::new(service, shutdown_rx)
        .run(listener, shutdown_signal)
        .await
}
