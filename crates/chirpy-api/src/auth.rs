use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::{info, warn};
use uuid::Uuid;

use chirpy_core::classify_email;
use chirpy_db::is_unique_violation;
use chirpy_types::api::{CredentialsRequest, UserResponse};

use crate::blocking;
use crate::convert::user_response;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/users — register. The password is hashed on a blocking thread
/// and only the hash reaches the database.
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.password_policy.validate(&req.password)?;

    let email = classify_email(&req.email).map(str::to_string);

    // Check if email is taken. Fast path only: a concurrent registration can
    // still win the race, which the UNIQUE constraint catches below.
    if let Some(email) = email.clone() {
        let db = state.clone();
        if blocking(move || db.db.get_user_by_email(&email)).await?.is_some() {
            warn!("Registration rejected: email already in use");
            return Err(ApiError::Conflict("Email already registered"));
        }
    }

    let st = state.clone();
    let user = blocking(move || {
        let hashed = st.credentials.hash_password(&req.password)?;
        let id = Uuid::new_v4().to_string();
        st.db.create_user(&id, email.as_deref(), &hashed)
    })
    .await
    .map_err(|e| match e {
        ApiError::Internal(err) if is_unique_violation(&err) => {
            warn!("Registration rejected: email registered concurrently");
            ApiError::Conflict("Email already registered")
        }
        other => other,
    })?;

    info!("User {} registered", user.id);
    Ok((StatusCode::CREATED, Json(user_response(user))))
}

/// POST /api/login — password check only, no session is issued.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let email = classify_email(&req.email)
        .map(str::to_string)
        .ok_or(ApiError::Unauthorized)?;

    let st = state.clone();
    let user = blocking(move || {
        let Some(user) = st.db.get_user_by_email(&email)? else {
            return Ok(None);
        };
        let matched = st.credentials.check_password(&req.password, &user.hashed_password);
        Ok(matched.then_some(user))
    })
    .await?
    .ok_or(ApiError::Unauthorized)?;

    info!("User {} logged in", user.id);
    Ok(Json(user_response(user)))
}
