//! Analysis request and result models.
//!
//! An [`AnalysisRequest`] is what callers hand to the analyzer. Each provider
//! call (and the rule-based pass) yields one [`AnalysisResult`], which is
//! never mutated afterwards; merging always builds a new value.

use serde::{Deserialize, Serialize};

/// Incoming analysis request describing one uploaded document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    /// Original filename as uploaded (required).
    #[serde(default)]
    pub filename: String,
    /// Category the uploader picked.
    #[serde(default)]
    pub declared_category: String,
    /// Document title, falls back to the filename when blank.
    #[serde(default)]
    pub title: String,
    /// Detected file type label (e.g. "PDF Document").
    #[serde(default)]
    pub file_type_label: String,
    /// File size in bytes, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

impl AnalysisRequest {
    pub fn new(filename: impl Into<String>, declared_category: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            declared_category: declared_category.into(),
            title: String::new(),
            file_type_label: String::new(),
            file_size: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_file_type(mut self, label: impl Into<String>) -> Self {
        self.file_type_label = label.into();
        self
    }

    pub fn with_file_size(mut self, bytes: u64) -> Self {
        self.file_size = Some(bytes);
        self
    }

    /// Title to show in prompts and summaries.
    pub fn display_title(&self) -> &str {
        let title = self.title.trim();
        if title.is_empty() {
            self.filename.trim()
        } else {
            title
        }
    }
}

/// Security classification levels, least to most restrictive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    Public,
    #[default]
    Internal,
    Confidential,
    Secret,
    TopSecret,
}

impl Classification {
    pub const ALL: [Classification; 5] = [
        Self::Public,
        Self::Internal,
        Self::Confidential,
        Self::Secret,
        Self::TopSecret,
    ];

    /// Levels we ask providers to choose from. TOP_SECRET is accepted if a
    /// provider volunteers it but is never offered.
    pub const SOLICITED: [Classification; 4] = [
        Self::Public,
        Self::Internal,
        Self::Confidential,
        Self::Secret,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "PUBLIC",
            Self::Internal => "INTERNAL",
            Self::Confidential => "CONFIDENTIAL",
            Self::Secret => "SECRET",
            Self::TopSecret => "TOP_SECRET",
        }
    }

    /// Exact, case-sensitive match against the wire names.
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review priority. Ordering follows urgency so `max` escalates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    /// Case-insensitive parse; providers are inconsistent about casing.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse sentiment bucket shown alongside the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.6 {
            Self::Positive
        } else if score <= 0.4 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
        }
    }
}

/// External analysis provider identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// OpenAI-compatible chat completions (OpenAI, Groq, Together).
    OpenAi,
    /// Google Gemini generateContent.
    Gemini,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Gemini => "Gemini",
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Canonical analysis produced by one provider call or the rule-based pass.
///
/// Provider results may leave scores, language and priority unset; the
/// merger and assembler decide how gaps are filled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub summary: String,
    pub suggested_category: Option<String>,
    pub suggested_classification: Classification,
    pub key_topics: Vec<String>,
    pub suggested_tags: Vec<String>,
    pub security_risks: Vec<String>,
    pub readability_score: Option<f64>,
    pub sentiment_score: Option<f64>,
    pub language: Option<String>,
    pub priority: Option<Priority>,
    pub confidence_score: Option<f64>,
    pub insights: Vec<String>,
}

/// How the final values were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisMethod {
    /// Two provider results merged by consensus.
    Hybrid,
    /// A single provider succeeded.
    SingleProvider,
    /// No provider result; heuristics only.
    RuleBased,
}

impl AnalysisMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hybrid => "Hybrid",
            Self::SingleProvider => "SingleProvider",
            Self::RuleBased => "RuleBased",
        }
    }
}

/// Result of the provider path: either one provider's result or a merge.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedResult {
    pub result: AnalysisResult,
    pub method: AnalysisMethod,
    pub providers: Vec<ProviderId>,
}

impl MergedResult {
    pub fn single(provider: ProviderId, result: AnalysisResult) -> Self {
        Self {
            result,
            method: AnalysisMethod::SingleProvider,
            providers: vec![provider],
        }
    }

    pub fn is_hybrid(&self) -> bool {
        self.method == AnalysisMethod::Hybrid
    }
}
