//! End-to-end analysis against mocked provider APIs.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use httpmock::prelude::*;

use docmeta::analysis::DocumentAnalyzer;
use docmeta::config::Settings;
use docmeta::models::{AnalysisMethod, AnalysisRequest, Classification, ProviderId};
use docmeta::rate_limit::ManualClock;

const OPENAI_PATH: &str = "/v1/chat/completions";
const GEMINI_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

fn settings(openai: Option<&MockServer>, gemini: Option<&MockServer>) -> Settings {
    let mut settings = Settings::default();
    if let Some(server) = openai {
        settings.providers.openai.api_key = Some("sk-test".to_string());
        settings.providers.openai.endpoint = server.base_url();
    }
    if let Some(server) = gemini {
        settings.providers.gemini.api_key = Some("g-test".to_string());
        settings.providers.gemini.endpoint = server.base_url();
    }
    settings
}

fn start_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap(),
    ))
}

fn openai_reply(analysis: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": format!("Here is the analysis:\n{}", analysis)
            }
        }]
    })
}

fn gemini_reply(analysis: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {"parts": [{"text": format!("```json\n{}\n```", analysis)}]}
        }]
    })
}

fn payroll_request() -> AnalysisRequest {
    AnalysisRequest::new("Payroll_Confidential_2024.pdf", "Financial Documents")
}

#[tokio::test]
async fn test_no_providers_configured_uses_rules() {
    let analyzer = DocumentAnalyzer::from_settings(&settings(None, None));

    let report = analyzer.analyze(payroll_request()).await.unwrap();
    assert_eq!(report.analysis_method, AnalysisMethod::RuleBased);
    assert_eq!(
        report.suggested_classification,
        Classification::Confidential
    );
    assert!(report.ai_providers.is_empty());
    assert!(report
        .warnings
        .iter()
        .any(|w| w.contains("AI providers are not configured")));

    // Same input, same output.
    let again = analyzer.analyze(payroll_request()).await.unwrap();
    assert_eq!(report, again);
}

#[tokio::test]
async fn test_both_providers_merge_to_hybrid() {
    let openai = MockServer::start_async().await;
    let gemini = MockServer::start_async().await;

    openai
        .mock_async(|when, then| {
            when.method(POST).path(OPENAI_PATH);
            then.status(200).json_body(openai_reply(serde_json::json!({
                "summary": "Payroll records.",
                "suggestedCategory": "Payroll",
                "suggestedClassification": "CONFIDENTIAL",
                "suggestedTags": ["payroll", "2024"],
                "insights": ["from openai"]
            })));
        })
        .await;
    gemini
        .mock_async(|when, then| {
            when.method(POST).path(GEMINI_PATH);
            then.status(200).json_body(gemini_reply(serde_json::json!({
                "summary": "Employee payroll records for 2024.",
                "suggestedClassification": "PUBLIC",
                "suggestedTags": ["2024", "salaries"],
                "priority": "high",
                "insights": ["from gemini"]
            })));
        })
        .await;

    let analyzer =
        DocumentAnalyzer::with_clock(&settings(Some(&openai), Some(&gemini)), start_clock());
    let report = analyzer.analyze(payroll_request()).await.unwrap();

    assert_eq!(report.analysis_method, AnalysisMethod::Hybrid);
    assert!(report.hybrid_analysis_used);
    assert_eq!(
        report.ai_providers,
        vec![ProviderId::OpenAi, ProviderId::Gemini]
    );
    assert_eq!(
        report.suggested_classification,
        Classification::Confidential
    );
    assert_eq!(report.summary, "Employee payroll records for 2024.");
    assert_eq!(report.suggested_category.as_deref(), Some("Payroll"));
    assert_eq!(report.suggested_tags, vec!["payroll", "2024", "salaries"]);
    assert_eq!(report.insights, vec!["from gemini"]);
    assert!(report.warnings.is_empty());
}

#[tokio::test]
async fn test_quota_error_cools_down_provider() {
    let openai = MockServer::start_async().await;
    let gemini = MockServer::start_async().await;

    let openai_mock = openai
        .mock_async(|when, then| {
            when.method(POST).path(OPENAI_PATH);
            then.status(429).json_body(serde_json::json!({
                "error": {"message": "Rate limit reached", "type": "requests", "code": "rate_limit_exceeded"}
            }));
        })
        .await;
    gemini
        .mock_async(|when, then| {
            when.method(POST).path(GEMINI_PATH);
            then.status(200).json_body(gemini_reply(serde_json::json!({
                "summary": "Payroll register.",
                "suggestedClassification": "CONFIDENTIAL"
            })));
        })
        .await;

    let clock = start_clock();
    let analyzer =
        DocumentAnalyzer::with_clock(&settings(Some(&openai), Some(&gemini)), clock.clone());

    let report = analyzer.analyze(payroll_request()).await.unwrap();
    assert_eq!(report.analysis_method, AnalysisMethod::SingleProvider);
    assert!(!report.hybrid_analysis_used);
    assert_eq!(report.ai_providers, vec![ProviderId::Gemini]);
    assert_eq!(
        report.warnings,
        vec!["OpenAI quota exceeded; cooling down until 2023-11-14T22:28:20Z".to_string()]
    );

    let status = analyzer.provider_status();
    assert!(!status[0].cooldown.available);
    assert!(status[0].cooldown.quota_exceeded);
    assert!(status[1].cooldown.available);

    // Still cooling down: OpenAI is not contacted again.
    clock.advance(Duration::from_secs(5 * 60));
    for _ in 0..3 {
        let report = analyzer.analyze(payroll_request()).await.unwrap();
        assert_eq!(report.ai_providers, vec![ProviderId::Gemini]);
    }
    openai_mock.assert_calls_async(1).await;

    // Window over: OpenAI is tried again.
    clock.advance(Duration::from_secs(11 * 60));
    analyzer.analyze(payroll_request()).await.unwrap();
    openai_mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn test_malformed_replies_fall_back_to_rules() {
    let openai = MockServer::start_async().await;
    let gemini = MockServer::start_async().await;

    openai
        .mock_async(|when, then| {
            when.method(POST).path(OPENAI_PATH);
            then.status(200).json_body(serde_json::json!({
                "choices": [{"message": {"content": "I'm unable to help with that."}}]
            }));
        })
        .await;
    gemini
        .mock_async(|when, then| {
            when.method(POST).path(GEMINI_PATH);
            then.status(503).body("overloaded");
        })
        .await;

    let analyzer =
        DocumentAnalyzer::with_clock(&settings(Some(&openai), Some(&gemini)), start_clock());
    let report = analyzer.analyze(payroll_request()).await.unwrap();
    let baseline = DocumentAnalyzer::from_settings(&settings(None, None))
        .analyze(payroll_request())
        .await
        .unwrap();

    assert_eq!(report.analysis_method, AnalysisMethod::RuleBased);
    assert_eq!(report.summary, baseline.summary);
    assert_eq!(
        report.suggested_classification,
        baseline.suggested_classification
    );
    assert_eq!(
        report.warnings,
        vec!["AI analysis unavailable; using rule-based analysis".to_string()]
    );

    // Non-quota failures never start a cooldown.
    assert!(analyzer
        .provider_status()
        .iter()
        .all(|s| s.cooldown.available && !s.cooldown.quota_exceeded));
}
