//! Final analysis payload returned to callers.

use serde::{Deserialize, Serialize};

use super::analysis::{AnalysisMethod, Classification, Priority, ProviderId, SentimentLabel};

/// Fully assembled analysis for one document.
///
/// Every field is populated: values the provider path omitted are filled
/// from the rule-based baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub summary: String,
    pub suggested_category: Option<String>,
    pub suggested_tags: Vec<String>,
    pub suggested_classification: Classification,
    pub classification_confidence: f64,
    pub content_type: String,
    pub language: String,
    pub readability_score: f64,
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
    pub key_topics: Vec<String>,
    pub security_risks: Vec<String>,
    pub priority: Priority,
    pub insights: Vec<String>,
    pub analysis_method: AnalysisMethod,
    pub ai_providers: Vec<ProviderId>,
    pub hybrid_analysis_used: bool,
    pub warnings: Vec<String>,
}
