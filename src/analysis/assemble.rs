//! Final payload assembly: provider values over rule-based values, plus
//! security-risk heuristics and warnings.

use chrono::SecondsFormat;

use super::orchestrator::{HybridRun, ProviderReport};
use super::rules::RuleBasedAnalysis;
use crate::llm::ProviderOutcome;
use crate::models::{
    AnalysisMethod, AnalysisReport, AnalysisRequest, MergedResult, Priority, SentimentLabel,
};

pub const NOT_CONFIGURED_WARNING: &str =
    "AI providers are not configured; using rule-based analysis";
pub const UNAVAILABLE_WARNING: &str = "AI analysis unavailable; using rule-based analysis";

const CREDENTIAL_MARKERS: &[&str] = &[
    "password",
    "passwd",
    "credential",
    "client_secret",
    "secret_key",
    "apikey",
    "api_key",
    "private_key",
    "token",
];

/// Build the final report for one request.
pub fn assemble(
    request: &AnalysisRequest,
    rules: RuleBasedAnalysis,
    run: HybridRun,
    large_file_threshold: u64,
) -> AnalysisReport {
    let warnings = warnings(&run.reports, run.merged.is_some());
    let RuleBasedAnalysis {
        result: baseline,
        sentiment_label: baseline_label,
    } = rules;

    let (chosen, method, providers) = match run.merged {
        Some(MergedResult {
            result,
            method,
            providers,
        }) => (Some(result), method, providers),
        None => (None, AnalysisMethod::RuleBased, Vec::new()),
    };
    let chosen = chosen.unwrap_or_default();

    let sentiment_label = chosen
        .sentiment_score
        .map(SentimentLabel::from_score)
        .unwrap_or(baseline_label);

    let mut security_risks = chosen.security_risks;
    if security_risks.is_empty() {
        security_risks = heuristic_risks(request, large_file_threshold);
    }

    AnalysisReport {
        summary: non_empty_str(chosen.summary, baseline.summary),
        suggested_category: chosen.suggested_category.or(baseline.suggested_category),
        suggested_tags: non_empty(chosen.suggested_tags, baseline.suggested_tags),
        // The provider path always carries a validated classification.
        suggested_classification: if method == AnalysisMethod::RuleBased {
            baseline.suggested_classification
        } else {
            chosen.suggested_classification
        },
        classification_confidence: chosen
            .confidence_score
            .or(baseline.confidence_score)
            .unwrap_or_default(),
        content_type: content_type(request),
        language: chosen
            .language
            .or(baseline.language)
            .unwrap_or_else(|| "English".to_string()),
        readability_score: chosen
            .readability_score
            .or(baseline.readability_score)
            .unwrap_or_default(),
        sentiment_score: chosen
            .sentiment_score
            .or(baseline.sentiment_score)
            .unwrap_or_default(),
        sentiment_label,
        key_topics: non_empty(chosen.key_topics, baseline.key_topics),
        security_risks,
        priority: chosen
            .priority
            .or(baseline.priority)
            .unwrap_or(Priority::Low),
        insights: non_empty(chosen.insights, baseline.insights),
        hybrid_analysis_used: method == AnalysisMethod::Hybrid,
        analysis_method: method,
        ai_providers: providers,
        warnings,
    }
}

fn non_empty<T>(primary: Vec<T>, fallback: Vec<T>) -> Vec<T> {
    if primary.is_empty() {
        fallback
    } else {
        primary
    }
}

fn non_empty_str(primary: String, fallback: String) -> String {
    if primary.trim().is_empty() {
        fallback
    } else {
        primary
    }
}

/// File type label, else a guess from the extension.
pub fn content_type(request: &AnalysisRequest) -> String {
    let label = request.file_type_label.trim();
    if !label.is_empty() {
        return label.to_string();
    }
    mime_guess::from_path(request.filename.trim())
        .first()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string())
}

/// Risks derivable without reading the document.
pub fn heuristic_risks(request: &AnalysisRequest, large_file_threshold: u64) -> Vec<String> {
    let mut risks = Vec::new();

    if let Some(size) = request.file_size.filter(|s| *s > large_file_threshold) {
        risks.push(format!(
            "Large file ({:.1} MB) may contain embedded or bulk sensitive data",
            size as f64 / (1024.0 * 1024.0)
        ));
    }

    let filename = request.filename.to_lowercase();
    if CREDENTIAL_MARKERS.iter().any(|m| filename.contains(m)) {
        risks.push("Filename suggests the document may contain credentials".to_string());
    }

    risks
}

fn warnings(reports: &[ProviderReport], have_result: bool) -> Vec<String> {
    let mut warnings = Vec::new();

    if !reports.is_empty() && reports.iter().all(|r| !r.outcome.is_configured()) {
        warnings.push(NOT_CONFIGURED_WARNING.to_string());
        return warnings;
    }

    for report in reports {
        if let Some(until) = report.outcome.quota_cooldown() {
            warnings.push(format!(
                "{} quota exceeded; cooling down until {}",
                report.provider,
                until.to_rfc3339_opts(SecondsFormat::Secs, true)
            ));
        }
    }

    if !have_result {
        warnings.push(UNAVAILABLE_WARNING.to_string());
    }
    warnings
}
