use tokio::sync::watch;

use crate::services::QuoteService;

/// Shared state handed to every request handler.
pub struct AppState {
    pub service: QuoteService,

    /// Flips to `true` once the server starts shutting down. Requests still
    /// waiting on the upstream call treat that as a cancellation.
    pub shutdown: watch::Receiver<bool>,
}

impl AppState {
    /// Resolves when the server is shutting down. Never resolves if the
    /// shutdown sender is gone without having fired.
    pub async fn cancelled(&self) {
        let mut shutdown = self.shutdown.clone();
        let stopped = shutdown.wait_for(|stop| *stop).await.is_ok();
        if !stopped {
            std::future::pending::<()>().await;
        }
    }
}
