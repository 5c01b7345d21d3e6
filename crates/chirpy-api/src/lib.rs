pub mod admin;
pub mod auth;
pub mod chirps;
pub mod convert;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod state;

use std::path::Path;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tracing::error;

pub use error::ApiError;
pub use metrics::Metrics;
pub use state::{AppState, AppStateInner, Platform};

/// Every Chirpy route. `static_root` is served under `/app` (counted in the
/// admin metrics) and its `assets/` subdirectory under `/assets`.
pub fn router(state: AppState, static_root: &Path) -> Router {
    let api_routes = Router::new()
        .route("/api/healthz", get(admin::healthz))
        .route("/api/users", post(auth::create_user))
        .route("/api/login", post(auth::login))
        .route("/api/chirps", get(chirps::get_chirps).post(chirps::create_chirp))
        .route("/api/chirps/{chirp_id}", get(chirps::get_chirp))
        .route("/admin/metrics", get(admin::metrics))
        .route("/admin/reset", post(admin::reset))
        .with_state(state.clone());

    // Layer only wraps what is already mounted, so /assets stays uncounted.
    let file_routes = Router::new()
        .nest_service("/app", ServeDir::new(static_root))
        .layer(axum::middleware::from_fn_with_state(state, middleware::count_hits))
        .nest_service("/assets", ServeDir::new(static_root.join("assets")));

    Router::new().merge(api_routes).merge(file_routes)
}

/// Run blocking work (SQLite, password hashing) off the async runtime.
pub(crate) async fn blocking<F, T>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal(anyhow::anyhow!("blocking task failed"))
        })?
        .map_err(ApiError::from)
}
