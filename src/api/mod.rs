//! REST API endpoints.
//!
//! Axum-based HTTP API serving standings, series records, head-to-head,
//! magic numbers and highlights for a season as of a given date.

pub mod cache;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::calculate::SeasonReport;
use crate::models::SnapshotId;
use crate::storage::{self, StorageError};
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::PathNotFound(path) => {
                ApiError::NotFound(format!("No game log at {}", path.display()))
            }
            StorageError::InvalidPath(season) => {
                ApiError::BadRequest(format!("Invalid season: {:?}", season))
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// Query parameters every season endpoint accepts.
#[derive(Debug, Default, Deserialize)]
pub struct SeasonParams {
    pub season: Option<String>,
    /// YYYY-MM-DD; defaults to today
    pub as_of: Option<String>,
}

/// Which report a response was computed from.
#[derive(Debug, Serialize)]
pub struct ReportMeta {
    pub season: String,
    pub as_of: NaiveDate,
    pub snapshot: SnapshotId,
}

impl ReportMeta {
    pub fn new(season: &str, report: &SeasonReport) -> Self {
        Self {
            season: season.to_string(),
            as_of: report.as_of,
            snapshot: report.snapshot.clone(),
        }
    }
}

/// Parse an optional `as_of` query value.
pub fn parse_as_of(as_of: Option<&str>) -> Result<NaiveDate, ApiError> {
    match as_of {
        None => Ok(chrono::Utc::now().date_naive()),
        Some(s) => crate::parse_date(s).ok_or_else(|| {
            ApiError::BadRequest(format!("Invalid as_of date (expected YYYY-MM-DD): {}", s))
        }),
    }
}

/// Resolve the season and load (or reuse) its report.
pub async fn load_report(
    state: &AppState,
    params: &SeasonParams,
) -> Result<(String, Arc<SeasonReport>), ApiError> {
    let season = params
        .season
        .clone()
        .unwrap_or_else(|| state.season.name.clone());
    let as_of = parse_as_of(params.as_of.as_deref())?;

    let ingest = storage::load_game_log(&state.storage, &season, &state.season.teams)?;
    let settings = state.settings(as_of);
    let tie_breaker = state.season.tie_break.tie_breaker();
    let report = state
        .cache
        .get_or_compute(&ingest.log, &settings, tie_breaker.as_ref())
        .await;

    Ok((season, report))
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origin == "*" {
        return layer.allow_origin(Any);
    }
    match HeaderValue::from_str(origin) {
        Ok(value) => layer.allow_origin(AllowOrigin::exact(value)),
        Err(_) => {
            warn!("Invalid CORS origin {:?}, allowing any", origin);
            layer.allow_origin(Any)
        }
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_origin);

    Router::new()
        .route("/api/health", get(routes::health::health))
        .route("/api/standings", get(routes::standings::get_standings))
        .route("/api/head-to-head", get(routes::standings::get_head_to_head))
        .route("/api/teams/:team", get(routes::teams::get_team))
        .route("/api/magic-numbers", get(routes::magic::get_magic_numbers))
        .route("/api/magic-matrix", get(routes::magic::get_magic_matrix))
        .route("/api/sweeps", get(routes::highlights::get_sweeps))
        .route("/api/weekly", get(routes::highlights::get_weekly))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_parse_as_of() {
        assert_eq!(
            parse_as_of(Some("2025-04-01")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
        );
        assert!(matches!(
            parse_as_of(Some("04/01/2025")),
            Err(ApiError::BadRequest(_))
        ));
        assert!(parse_as_of(None).is_ok());
    }

    #[test]
    fn test_storage_error_mapping() {
        let e: ApiError = StorageError::PathNotFound("data/normalized/x".into()).into();
        assert!(matches!(e, ApiError::NotFound(_)));
        let e: ApiError = StorageError::InvalidPath("..".to_string()).into();
        assert!(matches!(e, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(dir.path()));

        let (status, json) = get_json(app, "/api/standings?season=1999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert!(json["error"]["message"].as_str().unwrap().contains("1999"));
    }

    #[tokio::test]
    async fn test_bad_as_of_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(dir.path()));

        let (status, json) = get_json(app, "/api/standings?as_of=yesterday").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_path_traversal_season_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(dir.path()));

        let (status, _) = get_json(app, "/api/standings?season=..").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
