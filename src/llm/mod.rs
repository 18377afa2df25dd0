//! External AI analysis providers.
//!
//! Each provider is a [`CompletionBackend`] that turns one prompt into one
//! free-text reply. [`ProviderAdapter`] wraps a backend with the cooldown
//! gate, the call deadline and reply parsing, and never returns an error to
//! its caller.

mod adapter;
mod gemini;
mod json;
mod openai;
mod prompts;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::ProviderId;

pub use adapter::{FailureKind, ProviderAdapter, ProviderOutcome, ProviderStatus};
pub use gemini::GeminiBackend;
pub use json::extract_json_object;
pub use openai::OpenAiBackend;
pub use prompts::build_analysis_prompt;

/// Substrings that mark an error as quota or rate-limit related.
const QUOTA_INDICATORS: &[&str] = &[
    "quota",
    "rate limit",
    "rate_limit",
    "ratelimit",
    "resource_exhausted",
    "too many requests",
];

/// Errors from a single provider call.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0} API key not configured")]
    NotConfigured(ProviderId),

    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

impl ProviderError {
    /// Whether this failure means the provider's quota or rate limit was hit.
    pub fn is_quota(&self) -> bool {
        match self {
            ProviderError::Api { status: 429, .. } => true,
            ProviderError::Api { message, .. }
            | ProviderError::Connection(message)
            | ProviderError::Parse(message) => contains_quota_indicator(message),
            ProviderError::NotConfigured(_) | ProviderError::Timeout(_) => false,
        }
    }
}

fn contains_quota_indicator(message: &str) -> bool {
    let lower = message.to_lowercase();
    QUOTA_INDICATORS.iter().any(|needle| lower.contains(needle))
}

/// A text-completion provider.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    fn provider(&self) -> ProviderId;

    /// Whether credentials are present. Unconfigured backends are never called.
    fn is_configured(&self) -> bool;

    /// Model name, for status output.
    fn model(&self) -> &str;

    /// Send one prompt and return the raw reply text.
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}
