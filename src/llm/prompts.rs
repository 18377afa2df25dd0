//! Prompt construction for document metadata analysis.

use crate::models::{AnalysisRequest, Classification, DOCUMENT_CATEGORIES};

/// Response shape we ask every provider for.
const RESPONSE_SHAPE: &str = r#"{
  "summary": "2-3 sentence description of the document",
  "suggestedCategory": "one category from the list above, exactly as written",
  "suggestedClassification": "one classification from the list above",
  "keyTopics": ["topic"],
  "suggestedTags": ["lowercase-tag"],
  "securityRisks": ["risk description"],
  "readabilityScore": 0.0,
  "sentimentScore": 0.0,
  "language": "English",
  "priority": "LOW | MEDIUM | HIGH",
  "confidenceScore": 0.0,
  "insights": ["observation"]
}"#;

/// Build the single analysis prompt sent to a provider.
pub fn build_analysis_prompt(request: &AnalysisRequest) -> String {
    let categories = DOCUMENT_CATEGORIES.join(", ");
    let classifications = Classification::SOLICITED
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let file_type = if request.file_type_label.trim().is_empty() {
        "unknown"
    } else {
        request.file_type_label.trim()
    };

    format!(
        r#"You are a document management assistant. Analyze the document described below and suggest metadata for it.

Document title: {title}
Filename: {filename}
Declared category: {category}
File type: {file_type}

Available categories: {categories}

Available security classifications: {classifications}

Guidelines:
- Base the classification on how sensitive the document is likely to be. When unsure, prefer the more restrictive level.
- All scores are between 0.0 and 1.0. Higher readability means easier to read; higher sentiment means more positive.
- Use at most 8 tags and at most 6 topics.
- List security risks only if the document plausibly contains sensitive data.

Respond with ONLY a JSON object in exactly this shape, no other text:
{shape}"#,
        title = request.display_title(),
        filename = request.filename.trim(),
        category = request.declared_category.trim(),
        file_type = file_type,
        categories = categories,
        classifications = classifications,
        shape = RESPONSE_SHAPE,
    )
}
