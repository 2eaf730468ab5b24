use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{load_report, ApiError, ReportMeta, SeasonParams};
use crate::calculate::magic::magic_numbers;
use crate::models::{MagicMatrix, MagicNumberEntry};

#[derive(Debug, Deserialize)]
pub struct MagicParams {
    pub season: Option<String>,
    pub as_of: Option<String>,
    /// Target rank; defaults to the playoff cutoff
    pub rank: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct MagicNumbersResponse {
    #[serde(flatten)]
    pub meta: ReportMeta,
    pub target_rank: u32,
    pub entries: Vec<MagicNumberEntry>,
}

pub async fn get_magic_numbers(
    State(state): State<AppState>,
    Query(params): Query<MagicParams>,
) -> Result<Json<MagicNumbersResponse>, ApiError> {
    let target_rank = params.rank.unwrap_or(state.season.playoff_cutoff);
    if target_rank == 0 {
        return Err(ApiError::BadRequest("rank must be at least 1".to_string()));
    }

    let season_params = SeasonParams {
        season: params.season,
        as_of: params.as_of,
    };
    let (season, report) = load_report(&state, &season_params).await?;

    let entries = if target_rank == 1 {
        report.championship.clone()
    } else if target_rank == state.season.playoff_cutoff {
        report.playoff.clone()
    } else {
        let tie_breaker = state.season.tie_break.tie_breaker();
        magic_numbers(&report.standings, target_rank, tie_breaker.as_ref())
    };

    Ok(Json(MagicNumbersResponse {
        meta: ReportMeta::new(&season, &report),
        target_rank,
        entries,
    }))
}

#[derive(Debug, Serialize)]
pub struct MagicMatrixResponse {
    #[serde(flatten)]
    pub meta: ReportMeta,
    pub matrix: MagicMatrix,
}

pub async fn get_magic_matrix(
    State(state): State<AppState>,
    Query(params): Query<SeasonParams>,
) -> Result<Json<MagicMatrixResponse>, ApiError> {
    let (season, report) = load_report(&state, &params).await?;

    Ok(Json(MagicMatrixResponse {
        meta: ReportMeta::new(&season, &report),
        matrix: report.magic_matrix.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::test_support::*;
    use axum::http::StatusCode;
    use serde_json::Value;

    fn entry<'a>(json: &'a Value, team: &str) -> &'a Value {
        json["entries"]
            .as_array()
            .unwrap()
            .iter()
            .find(|e| e["team"] == team)
            .unwrap()
    }

    #[tokio::test]
    async fn test_magic_numbers_default_to_playoff_cutoff() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(dir.path()));

        let (status, json) =
            get_json(app, &format!("/api/magic-numbers?as_of={}", AS_OF)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["target_rank"], 2);

        let lg = entry(&json, "LG");
        assert_eq!(lg["magic_number"], 3);
        assert_eq!(lg["status"], "IN_CONTENTION");
        let nc = entry(&json, "NC");
        assert_eq!(nc["magic_number"], 6);
        assert_eq!(nc["eliminated"], false);
    }

    #[tokio::test]
    async fn test_magic_numbers_championship() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(dir.path()));

        let (_, json) =
            get_json(app, &format!("/api/magic-numbers?rank=1&as_of={}", AS_OF)).await;
        let lg = entry(&json, "LG");
        assert_eq!(lg["target_rank"], 1);
        assert_eq!(lg["magic_number"], 5);
        assert_eq!(lg["tragic_number"], 9);
    }

    #[tokio::test]
    async fn test_magic_numbers_rank_zero_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(dir.path()));

        let (status, _) = get_json(app, "/api/magic-numbers?rank=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_magic_matrix() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(dir.path()));

        let (status, json) = get_json(app, &format!("/api/magic-matrix?as_of={}", AS_OF)).await;
        assert_eq!(status, StatusCode::OK);

        let rows = json["matrix"]["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["team"], "LG");
        assert_eq!(rows[0]["cells"]["1"]["value"], 5);
        assert_eq!(rows[0]["cells"]["1"]["kind"], "magic");
        assert_eq!(rows[0]["cells"]["2"]["value"], 3);
        assert!(rows[0]["cells"]["3"].is_null());
    }
}
