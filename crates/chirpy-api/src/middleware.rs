use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::state::AppState;

/// Count every request to the static file server before serving it.
pub async fn count_hits(State(state): State<AppState>, req: Request, next: Next) -> Response {
    state.metrics.record_hit();
    next.run(req).await
}
