use axum::{
    extract::State,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::auth::{
    dto::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
    password::{hash_password, verify_password},
    repo::User,
};
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let hash = hash_password(&payload.password);
    let user = User::create(
        &state.db,
        &payload.username,
        &hash,
        payload.email.as_deref(),
    )
    .await?;

    info!(user_id = user.id, username = %user.username, "user registered");
    Ok(Json(RegisterResponse {
        id: user.id,
        username: user.username,
        message: "User registered successfully".into(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = User::find_by_username(&state.db, &payload.username)
        .await?
        .ok_or_else(|| {
            warn!(username = %payload.username, "login unknown username");
            ApiError::Unauthorized
        })?;

    if !verify_password(&payload.password, &user.password) {
        warn!(user_id = user.id, username = %user.username, "login invalid password");
        return Err(ApiError::Unauthorized);
    }

    info!(user_id = user.id, username = %user.username, "user logged in");
    Ok(Json(LoginResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        message: "Login successful".into(),
    }))
}
