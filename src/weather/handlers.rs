use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::{debug, info, instrument};

use super::{
    chart,
    dto::{HistoryWindow, WeatherReading},
    repo::{CityStats, HistoryEntry, WeatherRecord},
};
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/weather/:city", get(get_weather))
        .route("/history", get(get_history))
        .route("/stats", get(get_stats))
        .route("/visualization/temperature", get(get_temperature_chart))
}

/// Fetch current weather for a city (live or fallback) and log the query.
#[instrument(skip(state))]
pub async fn get_weather(
    State(state): State<AppState>,
    user: AuthUser,
    Path(city): Path<String>,
) -> Result<Json<WeatherReading>, ApiError> {
    let fetch = state.weather.current(&city).await;
    if fetch.is_fallback() {
        debug!(%city, "serving synthetic reading");
    }
    let reading = fetch.into_reading();

    // the caller's spelling is logged; the reading may carry the geocoded name
    WeatherRecord::insert(&state.db, user.id, &city, &reading).await?;

    info!(user_id = user.id, %city, description = %reading.description, "weather query logged");
    Ok(Json(reading))
}

#[instrument(skip(state))]
pub async fn get_history(
    State(state): State<AppState>,
    user: AuthUser,
    Query(window): Query<HistoryWindow>,
) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    let entries = WeatherRecord::history(&state.db, user.id, window.days).await?;
    Ok(Json(entries))
}

#[instrument(skip(state))]
pub async fn get_stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<CityStats>>, ApiError> {
    let stats = WeatherRecord::stats(&state.db, user.id).await?;
    Ok(Json(stats))
}

#[instrument(skip(state))]
pub async fn get_temperature_chart(
    State(state): State<AppState>,
    user: AuthUser,
    Query(window): Query<HistoryWindow>,
) -> Result<impl IntoResponse, ApiError> {
    let points = WeatherRecord::temperature_series(&state.db, user.id, window.days).await?;
    if points.is_empty() {
        return Err(ApiError::NotFound("No temperature data found".into()));
    }
    let png = chart::render_temperature_chart(&points)?;
    Ok(([(header::CONTENT_TYPE, "image/png")], png))
}
