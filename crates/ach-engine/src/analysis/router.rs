use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::domain::AnalysisSession;
use super::engine::AchEngine;
use super::scale::ScaleDescriptor;
use super::weighting::WeightingMode;
use crate::error::AppError;

/// Session payload plus optional per-request scoring overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(flatten)]
    pub session: AnalysisSession,
    #[serde(default)]
    pub scale: Option<ScaleDescriptor>,
    #[serde(default)]
    pub weighting: Option<WeightingMode>,
}

impl From<AnalysisSession> for AnalysisRequest {
    fn from(session: AnalysisSession) -> Self {
        Self {
            session,
            scale: None,
            weighting: None,
        }
    }
}

/// Router builder exposing the scoring engine as JSON endpoints.
pub fn analysis_router(engine: Arc<AchEngine>) -> Router {
    Router::new()
        .route("/api/v1/ach/analyze", post(analyze_handler))
        .route("/api/v1/ach/diagnosticity", post(diagnosticity_handler))
        .route("/api/v1/ach/likelihoods", post(likelihoods_handler))
        .route("/api/v1/ach/matrix", post(matrix_handler))
        .with_state(engine)
}

pub(crate) async fn analyze_handler(
    State(engine): State<Arc<AchEngine>>,
    request: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Response {
    respond(&engine, request, |engine, session| engine.analyze(session))
}

pub(crate) async fn diagnosticity_handler(
    State(engine): State<Arc<AchEngine>>,
    request: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Response {
    respond(&engine, request, |engine, session| {
        engine.diagnosticity(session)
    })
}

pub(crate) async fn likelihoods_handler(
    State(engine): State<Arc<AchEngine>>,
    request: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Response {
    respond(&engine, request, |engine, session| engine.likelihoods(session))
}

pub(crate) async fn matrix_handler(
    State(engine): State<Arc<AchEngine>>,
    request: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Response {
    respond(&engine, request, |engine, session| engine.matrix(session))
}

/// Malformed bodies and invalid overrides both answer with `{"error": ...}`.
fn respond<T, F>(
    engine: &AchEngine,
    request: Result<Json<AnalysisRequest>, JsonRejection>,
    compute: F,
) -> Response
where
    T: Serialize,
    F: FnOnce(&AchEngine, &AnalysisSession) -> T,
{
    let Json(AnalysisRequest {
        session,
        scale,
        weighting,
    }) = match request {
        Ok(request) => request,
        Err(rejection) => return AppError::from(rejection).into_response(),
    };

    match engine.customized(scale, weighting) {
        Ok(engine) => {
            let body = compute(&engine, &session);
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(error) => AppError::from(error).into_response(),
    }
}
