use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{info, warn};
use uuid::Uuid;

use chirpy_core::validate_chirp_length;
use chirpy_types::api::{ChirpResponse, CreateChirpRequest};

use crate::blocking;
use crate::convert::chirp_response;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/chirps — length is checked on the raw body, then the body is
/// sanitized and stored.
pub async fn create_chirp(
    State(state): State<AppState>,
    Json(req): Json<CreateChirpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if let Err(e) = validate_chirp_length(&req.body) {
        warn!("Chirp rejected for user {}: {:?}", req.user_id, e);
        return Err(e.into());
    }

    let body = state.profanity.sanitize(&req.body);

    let st = state.clone();
    let user_id = req.user_id.to_string();
    let chirp = blocking(move || {
        if st.db.get_user_by_id(&user_id)?.is_none() {
            return Ok(None);
        }
        let id = Uuid::new_v4().to_string();
        st.db.create_chirp(&id, &body, &user_id).map(Some)
    })
    .await?
    .ok_or(ApiError::NotFound("User not found"))?;

    info!("Chirp {} created by {}", chirp.id, chirp.user_id);
    Ok((StatusCode::CREATED, Json(chirp_response(chirp))))
}

pub async fn get_chirps(State(state): State<AppState>) -> Result<Json<Vec<ChirpResponse>>, ApiError> {
    let rows = blocking(move || state.db.get_chirps()).await?;
    Ok(Json(rows.into_iter().map(chirp_response).collect()))
}

pub async fn get_chirp(
    State(state): State<AppState>,
    Path(chirp_id): Path<Uuid>,
) -> Result<Json<ChirpResponse>, ApiError> {
    let row = blocking(move || state.db.get_chirp_by_id(&chirp_id.to_string()))
        .await?
        .ok_or(ApiError::NotFound("Chirp not found"))?;

    Ok(Json(chirp_response(row)))
}
