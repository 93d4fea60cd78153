use crate::state::AppState;
use axum::Router;

pub mod chart;
pub mod dto;
pub mod handlers;
pub mod mock;
pub mod provider;
pub mod repo;

pub use dto::WeatherReading;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
