//! Validation of raw provider output into a canonical [`AnalysisResult`].

use serde::Deserialize;

use crate::models::{is_known_category, AnalysisResult, Classification, Priority};

/// Provider JSON as parsed, before any validation.
///
/// Every field is optional so that a partially filled reply still parses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAnalysis {
    pub summary: Option<String>,
    pub suggested_category: Option<String>,
    pub suggested_classification: Option<String>,
    pub key_topics: Option<Vec<String>>,
    pub suggested_tags: Option<Vec<String>>,
    pub security_risks: Option<Vec<String>>,
    pub readability_score: Option<f64>,
    pub sentiment_score: Option<f64>,
    pub language: Option<String>,
    pub priority: Option<String>,
    pub confidence_score: Option<f64>,
    pub insights: Option<Vec<String>>,
}

/// Clip a raw provider result to the allowed enumerations.
///
/// Total: never fails, whatever the provider sent.
pub fn validate(raw: RawAnalysis) -> AnalysisResult {
    AnalysisResult {
        summary: raw
            .summary
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        suggested_category: raw.suggested_category.filter(|c| is_known_category(c)),
        suggested_classification: raw
            .suggested_classification
            .as_deref()
            .and_then(Classification::from_str)
            .unwrap_or_default(),
        key_topics: clean_list(raw.key_topics),
        suggested_tags: clean_list(raw.suggested_tags),
        security_risks: clean_list(raw.security_risks),
        readability_score: clamp_score(raw.readability_score),
        sentiment_score: clamp_score(raw.sentiment_score),
        language: raw
            .language
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty()),
        priority: raw.priority.as_deref().and_then(Priority::from_str),
        confidence_score: clamp_score(raw.confidence_score),
        insights: clean_list(raw.insights),
    }
}

fn clean_list(items: Option<Vec<String>>) -> Vec<String> {
    items
        .unwrap_or_default()
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn clamp_score(score: Option<f64>) -> Option<f64> {
    score.filter(|s| s.is_finite()).map(|s| s.clamp(0.0, 1.0))
}
