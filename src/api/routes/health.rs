use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::storage::list_seasons;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub default_season: String,
    pub seasons: Vec<String>,
    pub cached_reports: usize,
}

pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let seasons = list_seasons(&state.storage)?;

    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        default_season: state.season.name.clone(),
        seasons,
        cached_reports: state.cache.len().await,
    }))
}
