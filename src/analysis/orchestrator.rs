//! Concurrent fan-out to both provider adapters.

use std::sync::Arc;

use tracing::{debug, error};

use super::merge::merge;
use crate::llm::{FailureKind, ProviderAdapter, ProviderOutcome};
use crate::models::{AnalysisRequest, MergedResult, ProviderId};

/// Outcome of one provider during a hybrid run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderReport {
    pub provider: ProviderId,
    pub outcome: ProviderOutcome,
}

/// Everything a hybrid run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct HybridRun {
    /// Absent when neither provider produced a result.
    pub merged: Option<MergedResult>,
    /// Per-provider outcomes, primary first.
    pub reports: Vec<ProviderReport>,
}

pub struct Orchestrator {
    primary: Arc<ProviderAdapter>,
    secondary: Arc<ProviderAdapter>,
}

impl Orchestrator {
    /// `primary` is the first argument to the consensus merge.
    pub fn new(primary: ProviderAdapter, secondary: ProviderAdapter) -> Self {
        Self {
            primary: Arc::new(primary),
            secondary: Arc::new(secondary),
        }
    }

    pub fn adapters(&self) -> [&ProviderAdapter; 2] {
        [self.primary.as_ref(), self.secondary.as_ref()]
    }

    /// Call both providers concurrently and wait for both to settle.
    pub async fn run_hybrid(&self, request: &AnalysisRequest) -> HybridRun {
        let primary = spawn_analysis(self.primary.clone(), request.clone());
        let secondary = spawn_analysis(self.secondary.clone(), request.clone());
        let (a, b) = tokio::join!(primary, secondary);

        let a = ProviderReport {
            provider: self.primary.provider(),
            outcome: settle(self.primary.provider(), a),
        };
        let b = ProviderReport {
            provider: self.secondary.provider(),
            outcome: settle(self.secondary.provider(), b),
        };

        let merged = match (a.outcome.result(), b.outcome.result()) {
            (Some(ra), Some(rb)) => {
                debug!("Both providers succeeded, merging");
                Some(merge((a.provider, ra), (b.provider, rb)))
            }
            (Some(ra), None) => Some(MergedResult::single(a.provider, ra.clone())),
            (None, Some(rb)) => Some(MergedResult::single(b.provider, rb.clone())),
            (None, None) => None,
        };

        HybridRun {
            merged,
            reports: vec![a, b],
        }
    }
}

fn spawn_analysis(
    adapter: Arc<ProviderAdapter>,
    request: AnalysisRequest,
) -> tokio::task::JoinHandle<ProviderOutcome> {
    tokio::spawn(async move { adapter.analyze(&request).await })
}

fn settle(
    provider: ProviderId,
    joined: Result<ProviderOutcome, tokio::task::JoinError>,
) -> ProviderOutcome {
    match joined {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("{}: provider task failed: {}", provider, e);
            ProviderOutcome::Failed {
                kind: FailureKind::Transient,
                message: "provider task panicked".to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{CompletionBackend, ProviderError};
    use crate::models::{AnalysisMethod, Classification};
    use crate::rate_limit::{CooldownTracker, ManualClock, DEFAULT_COOLDOWN};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::time::{Duration, Instant};

    enum Behavior {
        Reply(&'static str),
        Slow(Duration, &'static str),
        Fail(u16),
        Panic,
        Unconfigured,
    }

    struct FixedBackend {
        provider: ProviderId,
        behavior: Behavior,
    }

    #[async_trait]
    impl CompletionBackend for FixedBackend {
        fn provider(&self) -> ProviderId {
            self.provider
        }

        fn is_configured(&self) -> bool {
            !matches!(self.behavior, Behavior::Unconfigured)
        }

        fn model(&self) -> &str {
            "fixed"
        }

        async fn complete(&self, _prompt: &str) -> Result<String, ProviderError> {
            match &self.behavior {
                Behavior::Reply(text) => Ok(text.to_string()),
                Behavior::Slow(delay, text) => {
                    tokio::time::sleep(*delay).await;
                    Ok(text.to_string())
                }
                Behavior::Fail(status) => Err(ProviderError::Api {
                    status: *status,
                    message: "failure".to_string(),
                }),
                Behavior::Panic => panic!("backend blew up"),
                Behavior::Unconfigured => Err(ProviderError::NotConfigured(self.provider)),
            }
        }
    }

    fn adapter(provider: ProviderId, behavior: Behavior) -> ProviderAdapter {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        ProviderAdapter::new(
            Arc::new(FixedBackend { provider, behavior }),
            CooldownTracker::new(DEFAULT_COOLDOWN, clock),
            Duration::from_secs(5),
        )
    }

    fn orchestrator(a: Behavior, b: Behavior) -> Orchestrator {
        Orchestrator::new(
            adapter(ProviderId::OpenAi, a),
            adapter(ProviderId::Gemini, b),
        )
    }

    fn request() -> AnalysisRequest {
        AnalysisRequest::new("plan.docx", "Reports")
    }

    #[tokio::test]
    async fn test_both_succeed_is_hybrid() {
        let run = orchestrator(
            Behavior::Reply(r#"{"suggestedClassification": "CONFIDENTIAL"}"#),
            Behavior::Reply(r#"{"suggestedClassification": "PUBLIC"}"#),
        )
        .run_hybrid(&request())
        .await;

        let merged = run.merged.unwrap();
        assert_eq!(merged.method, AnalysisMethod::Hybrid);
        assert_eq!(
            merged.result.suggested_classification,
            Classification::Confidential
        );
        assert_eq!(run.reports.len(), 2);
    }

    #[tokio::test]
    async fn test_providers_are_called_concurrently() {
        let delay = Duration::from_millis(200);
        let orchestrator = orchestrator(
            Behavior::Slow(delay, r#"{"summary": "a"}"#),
            Behavior::Slow(delay, r#"{"summary": "b"}"#),
        );

        let started = Instant::now();
        let run = orchestrator.run_hybrid(&request()).await;
        let elapsed = started.elapsed();

        assert_eq!(run.merged.unwrap().method, AnalysisMethod::Hybrid);
        assert!(elapsed >= delay);
        assert!(elapsed < Duration::from_millis(350), "took {:?}", elapsed);
    }

    #[tokio::test]
    async fn test_quota_on_primary_gives_single_secondary() {
        let orchestrator = orchestrator(
            Behavior::Fail(429),
            Behavior::Reply(r#"{"summary": "From Gemini."}"#),
        );
        let run = orchestrator.run_hybrid(&request()).await;

        let merged = run.merged.unwrap();
        assert_eq!(merged.method, AnalysisMethod::SingleProvider);
        assert_eq!(merged.providers, vec![ProviderId::Gemini]);
        assert_eq!(merged.result.summary, "From Gemini.");
        assert!(matches!(
            run.reports[0].outcome,
            ProviderOutcome::QuotaExceeded { .. }
        ));
        assert!(orchestrator.adapters()[0].cooldown().check().is_some());
    }

    #[tokio::test]
    async fn test_both_absent_is_none() {
        let run = orchestrator(Behavior::Unconfigured, Behavior::Fail(500))
            .run_hybrid(&request())
            .await;
        assert!(run.merged.is_none());
        assert_eq!(run.reports[0].outcome, ProviderOutcome::NotConfigured);
    }

    #[tokio::test]
    async fn test_panic_in_one_task_is_isolated() {
        let run = orchestrator(Behavior::Panic, Behavior::Reply(r#"{"summary": "ok"}"#))
            .run_hybrid(&request())
            .await;

        assert!(matches!(
            run.reports[0].outcome,
            ProviderOutcome::Failed {
                kind: FailureKind::Transient,
                ..
            }
        ));
        let merged = run.merged.unwrap();
        assert_eq!(merged.providers, vec![ProviderId::Gemini]);
    }
}
