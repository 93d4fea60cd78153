use axum::{
    extract::{Path, State},
    routing::{delete, post},
    Json, Router,
};
use tracing::{info, instrument};

use super::dto::{FavoriteCity, Message};
use super::repo::Favorite;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/favorites", post(add_favorite).get(list_favorites))
        .route("/favorites/:city", delete(delete_favorite))
}

#[instrument(skip(state, payload))]
pub async fn add_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<FavoriteCity>,
) -> Result<Json<Message>, ApiError> {
    Favorite::add(&state.db, user.id, &payload.city).await?;
    info!(user_id = user.id, city = %payload.city, "favorite added");
    Ok(Json(Message {
        message: format!("{} added to favorites", payload.city),
    }))
}

#[instrument(skip(state))]
pub async fn list_favorites(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Favorite>>, ApiError> {
    let favorites = Favorite::list(&state.db, user.id).await?;
    Ok(Json(favorites))
}

#[instrument(skip(state))]
pub async fn delete_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Path(city): Path<String>,
) -> Result<Json<Message>, ApiError> {
    Favorite::remove(&state.db, user.id, &city).await?;
    info!(user_id = user.id, %city, "favorite removed");
    Ok(Json(Message {
        message: format!("{city} removed from favorites"),
    }))
}
