//! API endpoint handlers.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::super::AppState;
use super::api_types::ApiResponse;
use crate::analysis::AnalysisError;
use crate::models::{AnalysisRequest, DOCUMENT_CATEGORIES};

/// Health check endpoint for container orchestration.
pub async fn health() -> impl IntoResponse {
    StatusCode::OK
}

/// Analyze one document's metadata.
pub async fn api_analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return ApiResponse::error(StatusCode::BAD_REQUEST, rejection.body_text())
                .into_response();
        }
    };

    match state.analyzer.analyze(request).await {
        Ok(report) => ApiResponse::ok(report).into_response(),
        Err(e @ AnalysisError::InvalidRequest(_)) => {
            ApiResponse::error(StatusCode::BAD_REQUEST, e.to_string())
                .into_response()
        }
        Err(e) => {
            tracing::error!("Analysis failed: {}", e);
            ApiResponse::error(StatusCode::INTERNAL_SERVER_ERROR, "Analysis failed")
                .into_response()
        }
    }
}

/// Provider configuration and cooldown state.
pub async fn api_providers(State(state): State<AppState>) -> impl IntoResponse {
    ApiResponse::ok(state.analyzer.provider_status())
}

/// The fixed category list providers choose from.
pub async fn api_categories() -> impl IntoResponse {
    ApiResponse::ok(DOCUMENT_CATEGORIES)
}
