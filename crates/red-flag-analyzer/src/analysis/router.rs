use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};

use super::domain::{AnalysisId, ApplicantRecord};
use super::repository::{AnalysisRepository, RepositoryError};
use super::service::{AnalysisServiceError, OverrideRequest, RedFlagAnalysisService};

/// Router builder exposing analysis intake, lookup, and verifier override endpoints.
pub fn analysis_router<R>(service: Arc<RedFlagAnalysisService<R>>) -> Router
where
    R: AnalysisRepository + 'static,
{
    Router::new()
        .route("/api/analyze", post(analyze_handler::<R>))
        .route("/api/analysis/:analysis_id", get(analysis_handler::<R>))
        .route(
            "/api/analysis/:analysis_id/override",
            put(override_handler::<R>),
        )
        .route("/api/prefilled-data", get(prefilled_handler))
        .with_state(service)
}

pub(crate) async fn analyze_handler<R>(
    State(service): State<Arc<RedFlagAnalysisService<R>>>,
    axum::Json(payload): axum::Json<Value>,
) -> Response
where
    R: AnalysisRepository + 'static,
{
    match service.analyze(payload) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn analysis_handler<R>(
    State(service): State<Arc<RedFlagAnalysisService<R>>>,
    Path(analysis_id): Path<String>,
) -> Response
where
    R: AnalysisRepository + 'static,
{
    match service.get(&AnalysisId(analysis_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn override_handler<R>(
    State(service): State<Arc<RedFlagAnalysisService<R>>>,
    Path(analysis_id): Path<String>,
    axum::Json(request): axum::Json<OverrideRequest>,
) -> Response
where
    R: AnalysisRepository + 'static,
{
    match service.override_decision(&AnalysisId(analysis_id), request) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn prefilled_handler() -> axum::Json<ApplicantRecord> {
    axum::Json(ApplicantRecord::sample())
}

fn error_response(error: AnalysisServiceError) -> Response {
    match error {
        AnalysisServiceError::Validation(error) => {
            let payload = json!({
                "error": error.to_string(),
                "field": error.field(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        AnalysisServiceError::InvalidOverride(_) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        AnalysisServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({
                "message": "Analysis not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        AnalysisServiceError::Repository(RepositoryError::Conflict) => {
            let payload = json!({
                "error": "analysis already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
