//! Provider credentials and model settings.

use serde::{Deserialize, Serialize};

const GROQ_ENDPOINT: &str = "https://api.groq.com/openai";
const GROQ_DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Settings shared by both providers plus per-provider sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// OpenAI-compatible provider (OpenAI, Groq, Together).
    #[serde(default)]
    pub openai: OpenAiConfig,
    /// Google Gemini provider.
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// How long a provider is skipped after a quota error.
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,
    /// Deadline for a single provider call.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_cooldown_secs() -> u64 {
    15 * 60
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            openai: OpenAiConfig::default(),
            gemini: GeminiConfig::default(),
            cooldown_secs: default_cooldown_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ProvidersConfig {
    /// Apply environment overrides using `lookup` to read variables.
    ///
    /// Supported env vars:
    /// - `DOCMETA_COOLDOWN_SECS`: quota cooldown window
    /// - `DOCMETA_REQUEST_TIMEOUT_SECS`: per-call deadline
    /// - plus the provider-specific variables handled by each section
    pub fn apply_env<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(n) = lookup("DOCMETA_COOLDOWN_SECS").and_then(|v| v.parse().ok()) {
            self.cooldown_secs = n;
        }
        if let Some(n) = lookup("DOCMETA_REQUEST_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.request_timeout_secs = n;
        }
        self.openai.apply_env(lookup);
        self.gemini.apply_env(lookup);
    }

    /// Whether at least one provider has credentials.
    pub fn any_configured(&self) -> bool {
        self.openai.is_configured() || self.gemini.is_configured()
    }
}

/// OpenAI-compatible chat completions settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API key; the provider is disabled when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL without the `/v1/...` path.
    #[serde(default = "default_openai_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_openai_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_openai_endpoint() -> String {
    "https://api.openai.com".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    1024
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_openai_endpoint(),
            model: default_openai_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl OpenAiConfig {
    pub fn is_configured(&self) -> bool {
        has_key(&self.api_key)
    }

    /// Supported env vars:
    /// - `OPENAI_API_KEY`: API key
    /// - `GROQ_API_KEY`: used when no OpenAI key is set; switches the
    ///   default endpoint and model to Groq
    /// - `OPENAI_ENDPOINT`, `OPENAI_MODEL`: explicit values always win
    pub fn apply_env<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let explicit_endpoint = lookup("OPENAI_ENDPOINT");
        let explicit_model = lookup("OPENAI_MODEL");

        if let Some(key) = lookup("OPENAI_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        } else if !self.is_configured() {
            if let Some(key) = lookup("GROQ_API_KEY").filter(|k| !k.trim().is_empty()) {
                self.api_key = Some(key);
                if explicit_endpoint.is_none() {
                    self.endpoint = GROQ_ENDPOINT.to_string();
                }
                if explicit_model.is_none() {
                    self.model = GROQ_DEFAULT_MODEL.to_string();
                }
            }
        }

        if let Some(endpoint) = explicit_endpoint {
            self.endpoint = endpoint;
        }
        if let Some(model) = explicit_model {
            self.model = model;
        }
    }
}

/// Gemini generateContent settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_gemini_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_gemini_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_gemini_endpoint(),
            model: default_gemini_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl GeminiConfig {
    pub fn is_configured(&self) -> bool {
        has_key(&self.api_key)
    }

    /// Supported env vars: `GEMINI_API_KEY`, `GEMINI_ENDPOINT`, `GEMINI_MODEL`.
    pub fn apply_env<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("GEMINI_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(endpoint) = lookup("GEMINI_ENDPOINT") {
            self.endpoint = endpoint;
        }
        if let Some(model) = lookup("GEMINI_MODEL") {
            self.model = model;
        }
    }
}

fn has_key(key: &Option<String>) -> bool {
    key.as_deref().is_some_and(|k| !k.trim().is_empty())
}
