//! Consensus merge of two successful provider results.
//!
//! The merge is order-sensitive: `a` is the primary (OpenAI-compatible)
//! provider and `b` the secondary (Gemini). Summary ties go to `b`, and
//! insights come only from `b`.

use crate::models::{AnalysisMethod, AnalysisResult, Classification, MergedResult, ProviderId};

pub const MAX_MERGED_TAGS: usize = 8;
pub const MAX_MERGED_TOPICS: usize = 6;

/// Score used for an absent value before averaging.
const NEUTRAL_SCORE: f64 = 0.5;

/// Merge results from provider `a` and provider `b` into a hybrid result.
pub fn merge(a: (ProviderId, &AnalysisResult), b: (ProviderId, &AnalysisResult)) -> MergedResult {
    let (provider_a, a) = a;
    let (provider_b, b) = b;

    let result = AnalysisResult {
        summary: longer_summary(&a.summary, &b.summary),
        suggested_category: a
            .suggested_category
            .clone()
            .or_else(|| b.suggested_category.clone()),
        suggested_classification: merge_classification(
            a.suggested_classification,
            b.suggested_classification,
        ),
        key_topics: union(&a.key_topics, &b.key_topics, Some(MAX_MERGED_TOPICS)),
        suggested_tags: union(&a.suggested_tags, &b.suggested_tags, Some(MAX_MERGED_TAGS)),
        security_risks: union(&a.security_risks, &b.security_risks, None),
        readability_score: Some(mean(a.readability_score, b.readability_score)),
        sentiment_score: Some(mean(a.sentiment_score, b.sentiment_score)),
        language: Some(
            a.language
                .clone()
                .or_else(|| b.language.clone())
                .unwrap_or_else(|| "English".to_string()),
        ),
        priority: a.priority.max(b.priority),
        confidence_score: Some(mean(a.confidence_score, b.confidence_score)),
        insights: b.insights.clone(),
    };

    MergedResult {
        result,
        method: AnalysisMethod::Hybrid,
        providers: vec![provider_a, provider_b],
    }
}

/// Equal values win; otherwise CONFIDENTIAL, then INTERNAL, then `a`.
///
/// SECRET and TOP_SECRET get no escalation of their own: SECRET vs PUBLIC
/// yields SECRET only because `a` said so.
pub fn merge_classification(a: Classification, b: Classification) -> Classification {
    if a == b {
        a
    } else if a == Classification::Confidential || b == Classification::Confidential {
        Classification::Confidential
    } else if a == Classification::Internal || b == Classification::Internal {
        Classification::Internal
    } else {
        a
    }
}

fn longer_summary(a: &str, b: &str) -> String {
    if a.chars().count() > b.chars().count() {
        a.to_string()
    } else {
        b.to_string()
    }
}

fn mean(a: Option<f64>, b: Option<f64>) -> f64 {
    let a = a.unwrap_or(NEUTRAL_SCORE);
    let b = b.unwrap_or(NEUTRAL_SCORE);
    ((a + b) / 2.0).clamp(0.0, 1.0)
}

/// De-duplicated union keeping `a`'s order first.
fn union(a: &[String], b: &[String], cap: Option<usize>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(a.len() + b.len());
    for item in a.iter().chain(b) {
        if !out.contains(item) {
            out.push(item.clone());
        }
    }
    if let Some(cap) = cap {
        out.truncate(cap);
    }
    out
}
