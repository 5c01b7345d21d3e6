use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
};
use tracing::{info, warn};

use crate::blocking;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/healthz
pub async fn healthz() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], "OK")
}

/// GET /admin/metrics
pub async fn metrics(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        "<html><body><h1>Welcome, Chirpy Admin</h1><p>Chirpy has been visited {} times!</p></body></html>",
        state.metrics.hits()
    ))
}

/// POST /admin/reset — dev only. Zeroes the hit counter and deletes every
/// user, which cascades to their chirps.
pub async fn reset(State(state): State<AppState>) -> Result<&'static str, ApiError> {
    if !state.platform.is_dev() {
        warn!("Reset refused on platform '{}'", state.platform);
        return Err(ApiError::Forbidden);
    }

    state.metrics.reset();

    let st = state.clone();
    let deleted = blocking(move || st.db.delete_users()).await?;

    info!("Reset: metrics zeroed, {} users deleted", deleted);
    Ok("Metrics reset\n")
}
