use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::{load_report, ApiError, ReportMeta, SeasonParams};
use crate::models::{StandingsEntry, TeamSeasonRecord};

#[derive(Debug, Serialize)]
pub struct TeamResponse {
    #[serde(flatten)]
    pub meta: ReportMeta,
    pub standing: Option<StandingsEntry>,
    #[serde(flatten)]
    pub record: TeamSeasonRecord,
}

/// Series list, summary, streaks and per-opponent records for one team.
pub async fn get_team(
    State(state): State<AppState>,
    Path(team): Path<String>,
    Query(params): Query<SeasonParams>,
) -> Result<Json<TeamResponse>, ApiError> {
    let (season, report) = load_report(&state, &params).await?;

    let record = report
        .team(&team)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("Team {} not in season {}", team, season)))?;

    Ok(Json(TeamResponse {
        meta: ReportMeta::new(&season, &report),
        standing: report.standing(&team).cloned(),
        record,
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::test_support::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_team_record() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(dir.path()));

        let (status, json) = get_json(app, &format!("/api/teams/LG?as_of={}", AS_OF)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["team"], "LG");
        assert_eq!(json["standing"]["rank"], 1);

        let series = json["series"].as_array().unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0]["opponent"], "KT");
        assert_eq!(series[0]["result"], "WIN");
        assert_eq!(series[0]["is_winning_sweep"], true);
        assert_eq!(series[1]["result"], "SPLIT");

        assert_eq!(json["summary"]["total_series"], 2);
        assert_eq!(json["summary"]["sweep_wins"], 1);
        // The split does not break or extend the series streak
        assert_eq!(json["series_streaks"]["current"]["type"], "WIN");
        assert_eq!(json["series_streaks"]["current"]["count"], 1);
        assert_eq!(json["game_streaks"]["current"]["type"], "LOSS");
        assert_eq!(json["game_streaks"]["longest_win"]["count"], 4);
    }

    #[tokio::test]
    async fn test_latest_series_ongoing_as_of_its_last_day() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(dir.path()));

        let (_, json) = get_json(app, "/api/teams/LG?as_of=2025-04-05").await;
        assert_eq!(json["series"][1]["result"], "ONGOING");
        assert_eq!(json["summary"]["ongoing_series"], 1);
    }

    #[tokio::test]
    async fn test_unknown_team() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(dir.path()));

        let (status, json) = get_json(app, "/api/teams/XYZ").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }
}
