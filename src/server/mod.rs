//! HTTP API for document analysis.
//!
//! Exposes the analyzer over JSON:
//! - `POST /api/analyze` to analyze one document
//! - `GET /api/providers` for provider configuration and cooldown state
//! - `GET /api/categories` for the fixed category list
//! - `GET /health` for liveness checks

mod handlers;
mod routes;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::analysis::DocumentAnalyzer;
use crate::config::Settings;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<DocumentAnalyzer>,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            analyzer: Arc::new(DocumentAnalyzer::from_settings(settings)),
        }
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn setup_test_app() -> axum::Router {
        // No API keys: every analysis takes the rule-based path.
        create_router(AppState::new(&Settings::default()))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn analyze_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = setup_test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_analyze_rule_based() {
        let response = setup_test_app()
            .oneshot(analyze_request(serde_json::json!({
                "filename": "Payroll_Confidential_2024.pdf",
                "declaredCategory": "Financial Documents",
                "title": "Payroll 2024"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["error"], false);
        assert_eq!(json["data"]["suggestedClassification"], "CONFIDENTIAL");
        assert_eq!(json["data"]["analysisMethod"], "RuleBased");
        assert_eq!(json["data"]["hybridAnalysisUsed"], false);
        assert!(json["data"]["warnings"][0]
            .as_str()
            .unwrap()
            .contains("AI providers are not configured"));
    }

    #[tokio::test]
    async fn test_analyze_missing_filename_is_bad_request() {
        let response = setup_test_app()
            .oneshot(analyze_request(serde_json::json!({
                "declaredCategory": "Reports"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], true);
        assert!(json["data"]["message"]
            .as_str()
            .unwrap()
            .contains("filename"));
    }

    #[tokio::test]
    async fn test_providers_status() {
        let response = setup_test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/providers")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let providers = json["data"].as_array().unwrap();
        assert_eq!(providers.len(), 2);
        assert_eq!(providers[0]["provider"], "openai");
        assert_eq!(providers[1]["provider"], "gemini");
        assert_eq!(providers[0]["configured"], false);
        assert_eq!(providers[0]["available"], true);
    }

    #[tokio::test]
    async fn test_categories() {
        let response = setup_test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/categories")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let categories = json["data"].as_array().unwrap();
        assert_eq!(categories.len(), crate::models::DOCUMENT_CATEGORIES.len());
        assert!(categories.iter().any(|c| c == "Financial Documents"));
    }
}
