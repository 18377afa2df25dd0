//! Deterministic rule-based analysis.
//!
//! Everything here is keyed on lowercase substrings and words of the filename
//! and the declared category. No network, no randomness: the same request
//! always yields the same analysis.

use crate::models::{
    is_known_category, AnalysisRequest, AnalysisResult, Classification, Priority, SentimentLabel,
};

/// Confidence reported for heuristic results.
pub const RULE_BASED_CONFIDENCE: f64 = 0.5;

const MAX_TAGS: usize = 8;

/// Filename keywords. Short or ambiguous words only count as whole tokens,
/// so "nda" does not fire on "agenda" nor "secret" on "secretary".
struct Keywords {
    substrings: &'static [&'static str],
    tokens: &'static [&'static str],
}

impl Keywords {
    fn matches(&self, filename: &str) -> bool {
        contains_any(filename, self.substrings)
            || filename
                .split(|c: char| !c.is_alphanumeric())
                .any(|token| self.tokens.contains(&token))
    }
}

/// Most restrictive bucket first.
const HIGH_SECURITY_KEYWORDS: Keywords = Keywords {
    substrings: &["topsecret", "restricted"],
    tokens: &["secret", "secrets", "classified"],
};
const MEDIUM_SECURITY_KEYWORDS: Keywords = Keywords {
    substrings: &[
        "confidential",
        "private",
        "payroll",
        "salary",
        "personnel",
        "nondisclosure",
        "non-disclosure",
        "medical",
    ],
    tokens: &["ssn", "nda", "ndas"],
};
const PUBLIC_KEYWORDS: &[&str] = &[
    "public",
    "press",
    "newsletter",
    "brochure",
    "announcement",
    "flyer",
];

/// Category substrings whose documents default to CONFIDENTIAL or PUBLIC.
const CONFIDENTIAL_CATEGORY_KEYWORDS: &[&str] = &[
    "financial",
    "legal",
    "medical",
    "human resources",
    "employee",
    "payroll",
    "tax",
    "bank",
    "contract",
    "agreement",
];
const PUBLIC_CATEGORY_KEYWORDS: &[&str] = &["marketing", "press", "brochure", "newsletter"];

const NEGATIVE_KEYWORDS: &[&str] = &[
    "complaint",
    "dispute",
    "termination",
    "violation",
    "incident",
    "lawsuit",
    "penalty",
    "overdue",
    "breach",
    "failure",
    "warning",
];
const POSITIVE_KEYWORDS: &[&str] = &[
    "award",
    "success",
    "achievement",
    "approval",
    "approved",
    "growth",
    "congratulations",
    "celebration",
    "thank",
];

const URGENT_KEYWORDS: &[&str] = &["urgent", "asap", "critical", "deadline", "immediate"];

/// Category keyword to readability score, first match wins.
const READABILITY_TABLE: &[(&str, f64)] = &[
    ("legal", 0.35),
    ("contract", 0.35),
    ("agreement", 0.35),
    ("technical", 0.45),
    ("specification", 0.45),
    ("research", 0.45),
    ("medical", 0.45),
    ("financial", 0.55),
    ("tax", 0.55),
    ("report", 0.65),
    ("policy", 0.65),
    ("policies", 0.65),
    ("human resources", 0.7),
    ("training", 0.75),
    ("marketing", 0.85),
    ("newsletter", 0.85),
    ("brochure", 0.85),
];
const DEFAULT_READABILITY: f64 = 0.7;

/// Keyword to topic label.
const TOPIC_TABLE: &[(&str, &str)] = &[
    ("budget", "Budget Planning"),
    ("payroll", "Payroll"),
    ("salary", "Compensation"),
    ("invoice", "Invoicing"),
    ("tax", "Taxation"),
    ("audit", "Audit"),
    ("contract", "Contract Management"),
    ("agreement", "Contract Management"),
    ("policy", "Policy"),
    ("compliance", "Compliance"),
    ("report", "Reporting"),
    ("meeting", "Meetings"),
    ("minutes", "Meetings"),
    ("project", "Project Management"),
    ("training", "Training"),
    ("security", "Security"),
    ("marketing", "Marketing"),
    ("sales", "Sales"),
    ("customer", "Customer Relations"),
    ("employee", "Human Resources"),
    ("hiring", "Recruitment"),
    ("resume", "Recruitment"),
    ("medical", "Healthcare"),
    ("research", "Research"),
];

/// Category keyword to summary template. `{title}` and `{category}` are
/// substituted.
const SUMMARY_TEMPLATES: &[(&str, &str)] = &[
    (
        "financial",
        "Financial document \"{title}\" containing monetary records and fiscal information.",
    ),
    (
        "legal",
        "Legal document \"{title}\" outlining terms, obligations or legal matters.",
    ),
    (
        "contract",
        "Contract \"{title}\" defining an agreement between parties.",
    ),
    (
        "human resources",
        "Human resources document \"{title}\" related to personnel and workplace matters.",
    ),
    (
        "technical",
        "Technical document \"{title}\" describing systems, specifications or procedures.",
    ),
    (
        "marketing",
        "Marketing material \"{title}\" intended for promotion and external communication.",
    ),
    (
        "medical",
        "Medical document \"{title}\" containing health-related information.",
    ),
    (
        "report",
        "Report \"{title}\" presenting findings and information.",
    ),
    (
        "policy",
        "Policy document \"{title}\" describing rules and guidelines.",
    ),
];
const DEFAULT_SUMMARY: &str = "Document \"{title}\" filed under {category}.";

/// Heuristic analysis plus the sentiment label, which only this path names
/// directly.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleBasedAnalysis {
    pub result: AnalysisResult,
    pub sentiment_label: SentimentLabel,
}

/// Run every heuristic for a request.
pub fn analyze(request: &AnalysisRequest) -> RuleBasedAnalysis {
    let filename = request.filename.to_lowercase();
    let category = request.declared_category.to_lowercase();

    let classification = classify(&filename, &category);
    let (sentiment_label, sentiment_score) = sentiment(&filename);
    let key_topics = topics(request, &filename, &category);

    let result = AnalysisResult {
        summary: summary(request, &category),
        suggested_category: Some(request.declared_category.trim().to_string())
            .filter(|c| is_known_category(c)),
        suggested_classification: classification,
        suggested_tags: tags(request, &key_topics),
        key_topics,
        security_risks: Vec::new(),
        readability_score: Some(readability(&category)),
        sentiment_score: Some(sentiment_score),
        language: Some("English".to_string()),
        priority: Some(priority(&filename, classification)),
        confidence_score: Some(RULE_BASED_CONFIDENCE),
        insights: vec![classification_insight(&filename, &category, classification)],
    };

    RuleBasedAnalysis {
        result,
        sentiment_label,
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Security classification from ordered keyword buckets.
pub fn classify(filename: &str, category: &str) -> Classification {
    if HIGH_SECURITY_KEYWORDS.matches(filename) {
        Classification::Secret
    } else if MEDIUM_SECURITY_KEYWORDS.matches(filename) {
        Classification::Confidential
    } else if contains_any(filename, PUBLIC_KEYWORDS) {
        Classification::Public
    } else if contains_any(category, CONFIDENTIAL_CATEGORY_KEYWORDS) {
        Classification::Confidential
    } else if contains_any(category, PUBLIC_CATEGORY_KEYWORDS) {
        Classification::Public
    } else {
        Classification::Internal
    }
}

/// Sentiment label and score. Negative beats positive beats the default.
pub fn sentiment(filename: &str) -> (SentimentLabel, f64) {
    if contains_any(filename, NEGATIVE_KEYWORDS) {
        (SentimentLabel::Negative, 0.3)
    } else if contains_any(filename, POSITIVE_KEYWORDS) {
        (SentimentLabel::Positive, 0.8)
    } else {
        (SentimentLabel::Positive, 0.6)
    }
}

pub fn readability(category: &str) -> f64 {
    READABILITY_TABLE
        .iter()
        .find(|(keyword, _)| category.contains(keyword))
        .map(|(_, score)| *score)
        .unwrap_or(DEFAULT_READABILITY)
}

fn topics(request: &AnalysisRequest, filename: &str, category: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for (keyword, label) in TOPIC_TABLE {
        if (filename.contains(keyword) || category.contains(keyword))
            && !found.iter().any(|t| t == label)
        {
            found.push(label.to_string());
        }
    }

    if found.is_empty() {
        let declared = request.declared_category.trim();
        if !declared.is_empty() {
            found.push(declared.to_string());
        }
    }
    found
}

fn summary(request: &AnalysisRequest, category: &str) -> String {
    let template = SUMMARY_TEMPLATES
        .iter()
        .find(|(keyword, _)| category.contains(keyword))
        .map(|(_, template)| *template)
        .unwrap_or(DEFAULT_SUMMARY);

    let declared = request.declared_category.trim();
    template
        .replace("{title}", request.display_title())
        .replace(
            "{category}",
            if declared.is_empty() {
                "an unspecified category"
            } else {
                declared
            },
        )
}

/// Tags from category words, file type and topics, in that order.
fn tags(request: &AnalysisRequest, topics: &[String]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    let mut push = |tag: String| {
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    };

    for word in request.declared_category.split_whitespace() {
        let word = word.to_lowercase();
        if word.len() > 2 && word != "and" && word != "documents" {
            push(word);
        }
    }
    push(slug(&request.file_type_label));
    for topic in topics {
        push(slug(topic));
    }

    tags.truncate(MAX_TAGS);
    tags
}

fn slug(text: &str) -> String {
    text.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

fn priority(filename: &str, classification: Classification) -> Priority {
    if contains_any(filename, URGENT_KEYWORDS) {
        Priority::High
    } else if matches!(
        classification,
        Classification::Confidential | Classification::Secret | Classification::TopSecret
    ) {
        Priority::Medium
    } else {
        Priority::Low
    }
}

fn classification_insight(
    filename: &str,
    category: &str,
    classification: Classification,
) -> String {
    let basis = if HIGH_SECURITY_KEYWORDS.matches(filename)
        || MEDIUM_SECURITY_KEYWORDS.matches(filename)
        || contains_any(filename, PUBLIC_KEYWORDS)
    {
        "filename keywords"
    } else if contains_any(category, CONFIDENTIAL_CATEGORY_KEYWORDS)
        || contains_any(category, PUBLIC_CATEGORY_KEYWORDS)
    {
        "the declared category"
    } else {
        "the default policy"
    };
    format!("Classified as {} based on {}.", classification, basis)
}
