use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{load_report, ApiError, ReportMeta, SeasonParams};
use crate::models::{SweepHighlights, WeeklyStats};

#[derive(Debug, Serialize)]
pub struct SweepsResponse {
    #[serde(flatten)]
    pub meta: ReportMeta,
    #[serde(flatten)]
    pub highlights: SweepHighlights,
}

pub async fn get_sweeps(
    State(state): State<AppState>,
    Query(params): Query<SeasonParams>,
) -> Result<Json<SweepsResponse>, ApiError> {
    let (season, report) = load_report(&state, &params).await?;

    Ok(Json(SweepsResponse {
        meta: ReportMeta::new(&season, &report),
        highlights: report.sweeps.clone(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct WeeklyParams {
    pub season: Option<String>,
    pub as_of: Option<String>,
    /// Restrict every week to one team
    pub team: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WeeklyResponse {
    #[serde(flatten)]
    pub meta: ReportMeta,
    pub weeks: Vec<WeeklyStats>,
}

pub async fn get_weekly(
    State(state): State<AppState>,
    Query(params): Query<WeeklyParams>,
) -> Result<Json<WeeklyResponse>, ApiError> {
    let season_params = SeasonParams {
        season: params.season,
        as_of: params.as_of,
    };
    let (season, report) = load_report(&state, &season_params).await?;

    let mut weeks = report.weekly.clone();
    if let Some(team) = params.team.as_deref() {
        if report.team(team).is_none() {
            return Err(ApiError::NotFound(format!(
                "Team {} not in season {}",
                team, season
            )));
        }
        for week in &mut weeks {
            week.teams.retain(|code, _| code == team);
        }
    }

    Ok(Json(WeeklyResponse {
        meta: ReportMeta::new(&season, &report),
        weeks,
    }))
}
