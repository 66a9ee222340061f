use std::{future::Future, sync::Arc};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tokio::{net::TcpListener, sync::watch};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    app::{AppState, routes},
    services::QuoteService,
};

pub struct App {
    state: Arc<AppState>,
}

impl App {
    pub fn new(service: QuoteService, shutdown: watch::Receiver<bool>) -> Self {
        Self {
            state: Arc::new(AppState { service, shutdown }),
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/cotacao", get(routes::get_cotacao))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Serves requests on `listener` until `shutdown_signal` resolves, then
    /// waits for in-flight requests to finish.
    pub async fn run<F>(self, listener: TcpListener, shutdown_signal: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr().context("Failed to read listen address")?;
        info!("Listening on http://{}", addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal)
            .await
            .context("Server error")
    }
}
