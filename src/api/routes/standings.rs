use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::{load_report, ApiError, ReportMeta, SeasonParams};
use crate::models::{HeadToHeadMatrix, StandingsEntry};

#[derive(Debug, Serialize)]
pub struct StandingsResponse {
    #[serde(flatten)]
    pub meta: ReportMeta,
    pub standings: Vec<StandingsEntry>,
}

pub async fn get_standings(
    State(state): State<AppState>,
    Query(params): Query<SeasonParams>,
) -> Result<Json<StandingsResponse>, ApiError> {
    let (season, report) = load_report(&state, &params).await?;

    Ok(Json(StandingsResponse {
        meta: ReportMeta::new(&season, &report),
        standings: report.standings.clone(),
    }))
}

#[derive(Debug, Serialize)]
pub struct HeadToHeadResponse {
    #[serde(flatten)]
    pub meta: ReportMeta,
    pub matrix: HeadToHeadMatrix,
}

pub async fn get_head_to_head(
    State(state): State<AppState>,
    Query(params): Query<SeasonParams>,
) -> Result<Json<HeadToHeadResponse>, ApiError> {
    let (season, report) = load_report(&state, &params).await?;

    Ok(Json(HeadToHeadResponse {
        meta: ReportMeta::new(&season, &report),
        matrix: report.head_to_head.clone(),
    }))
}
