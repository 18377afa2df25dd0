//! Provider adapter: cooldown gate, deadline, reply parsing and failure
//! classification around one [`CompletionBackend`].

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::json::extract_json_object;
use super::prompts::build_analysis_prompt;
use super::{CompletionBackend, ProviderError};
use crate::analysis::validate::{validate, RawAnalysis};
use crate::models::{AnalysisRequest, AnalysisResult, ProviderId};
use crate::rate_limit::{CooldownStatus, CooldownTracker};

/// Why a provider call produced no result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Network, HTTP or provider-side error that is not quota related.
    Transient,
    /// The reply had no usable JSON object.
    Malformed,
    /// The call did not finish before the deadline.
    Timeout,
}

/// Outcome of one provider call.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutcome {
    Success(AnalysisResult),
    /// No credentials; nothing was sent.
    NotConfigured,
    /// Skipped because an earlier quota error is still cooling down.
    CoolingDown { until: DateTime<Utc> },
    /// This call hit the quota; cooldown started.
    QuotaExceeded { until: DateTime<Utc> },
    Failed { kind: FailureKind, message: String },
}

impl ProviderOutcome {
    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            ProviderOutcome::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn into_result(self) -> Option<AnalysisResult> {
        match self {
            ProviderOutcome::Success(result) => Some(result),
            _ => None,
        }
    }

    /// Deadline of the quota cooldown this outcome reports, if any.
    pub fn quota_cooldown(&self) -> Option<DateTime<Utc>> {
        match self {
            ProviderOutcome::CoolingDown { until } | ProviderOutcome::QuotaExceeded { until } => {
                Some(*until)
            }
            _ => None,
        }
    }

    pub fn is_configured(&self) -> bool {
        !matches!(self, ProviderOutcome::NotConfigured)
    }
}

/// Status of a provider for operators.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderStatus {
    pub provider: ProviderId,
    pub configured: bool,
    pub model: String,
    #[serde(flatten)]
    pub cooldown: CooldownStatus,
}

/// Wraps one provider backend. Never returns an error to its caller.
pub struct ProviderAdapter {
    backend: Arc<dyn CompletionBackend>,
    cooldown: CooldownTracker,
    deadline: Duration,
}

impl ProviderAdapter {
    pub fn new(
        backend: Arc<dyn CompletionBackend>,
        cooldown: CooldownTracker,
        deadline: Duration,
    ) -> Self {
        Self {
            backend,
            cooldown,
            deadline,
        }
    }

    pub fn provider(&self) -> ProviderId {
        self.backend.provider()
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_configured()
    }

    pub fn cooldown(&self) -> &CooldownTracker {
        &self.cooldown
    }

    pub fn status(&self) -> ProviderStatus {
        ProviderStatus {
            provider: self.provider(),
            configured: self.is_configured(),
            model: self.backend.model().to_string(),
            cooldown: self.cooldown.status(),
        }
    }

    /// Analyze a document with this provider.
    pub async fn analyze(&self, request: &AnalysisRequest) -> ProviderOutcome {
        let provider = self.provider();

        if !self.backend.is_configured() {
            debug!("{}: not configured, skipping", provider);
            return ProviderOutcome::NotConfigured;
        }

        if let Some(until) = self.cooldown.check() {
            debug!("{}: cooling down until {}, skipping", provider, until);
            return ProviderOutcome::CoolingDown { until };
        }

        let prompt = build_analysis_prompt(request);
        let reply = match tokio::time::timeout(self.deadline, self.backend.complete(&prompt)).await
        {
            Ok(Ok(reply)) => reply,
            Ok(Err(e)) => return self.handle_failure(e),
            Err(_) => return self.handle_failure(ProviderError::Timeout(self.deadline)),
        };

        match parse_reply(&reply) {
            Ok(raw) => {
                info!("{}: analysis succeeded for {}", provider, request.filename);
                ProviderOutcome::Success(validate(raw))
            }
            Err(message) => {
                warn!("{}: malformed response: {}", provider, message);
                ProviderOutcome::Failed {
                    kind: FailureKind::Malformed,
                    message,
                }
            }
        }
    }

    fn handle_failure(&self, error: ProviderError) -> ProviderOutcome {
        let provider = self.provider();

        if error.is_quota() {
            let until = self.cooldown.record_quota_failure();
            warn!(
                "{}: quota exceeded ({}), cooling down until {}",
                provider, error, until
            );
            return ProviderOutcome::QuotaExceeded { until };
        }

        let kind = match error {
            ProviderError::Timeout(_) => FailureKind::Timeout,
            ProviderError::Parse(_) => FailureKind::Malformed,
            _ => FailureKind::Transient,
        };
        warn!("{}: analysis failed: {}", provider, error);
        ProviderOutcome::Failed {
            kind,
            message: error.to_string(),
        }
    }
}

/// Extract and parse the JSON object embedded in a reply.
fn parse_reply(reply: &str) -> Result<RawAnalysis, String> {
    let json = extract_json_object(reply)
        .ok_or_else(|| "no JSON object found in response".to_string())?;
    serde_json::from_str(json).map_err(|e| format!("invalid JSON object: {}", e))
}
