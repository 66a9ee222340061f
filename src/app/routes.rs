use std::sync::Arc;

use axum::extract::State;

use crate::{app::AppState, error::AppError};

/// GET /cotacao
///
/// Returns the current bid followed by a newline.
pub async fn get_cotacao(State(state): State<Arc<AppState>>) -> Result<String, AppError> {
    let quote = state.service.get_quote(state.cancelled()).await?;
    Ok(format!("{}\n", quote.bid()))
}
