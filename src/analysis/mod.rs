//! Document metadata analysis.
//!
//! [`DocumentAnalyzer`] is the entry point: it computes the rule-based
//! baseline, fans out to both AI providers, and assembles the final
//! [`AnalysisReport`]. Provider failures never surface as errors; the worst
//! case is a purely rule-based report with warnings.

pub mod assemble;
pub mod merge;
pub mod orchestrator;
pub mod rules;
pub(crate) mod validate;

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::info;

use crate::config::Settings;
use crate::llm::{GeminiBackend, OpenAiBackend, ProviderAdapter, ProviderStatus};
use crate::models::{AnalysisReport, AnalysisRequest};
use crate::rate_limit::{Clock, CooldownTracker, SystemClock};

pub use orchestrator::{HybridRun, Orchestrator, ProviderReport};

/// Category used when the caller does not declare one.
pub const DEFAULT_CATEGORY: &str = "General";

/// Errors visible to callers of [`DocumentAnalyzer::analyze`].
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Analysis service shared by the CLI and the HTTP server.
pub struct DocumentAnalyzer {
    orchestrator: Orchestrator,
    large_file_threshold: u64,
}

impl DocumentAnalyzer {
    pub fn new(orchestrator: Orchestrator, large_file_threshold: u64) -> Self {
        Self {
            orchestrator,
            large_file_threshold,
        }
    }

    /// Build both providers from settings using the system clock.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_clock(settings, Arc::new(SystemClock))
    }

    pub fn with_clock(settings: &Settings, clock: Arc<dyn Clock>) -> Self {
        let providers = &settings.providers;
        let window = Duration::from_secs(providers.cooldown_secs);
        let deadline = Duration::from_secs(providers.request_timeout_secs);

        let openai = ProviderAdapter::new(
            Arc::new(OpenAiBackend::new(providers.openai.clone())),
            CooldownTracker::new(window, clock.clone()),
            deadline,
        );
        let gemini = ProviderAdapter::new(
            Arc::new(GeminiBackend::new(providers.gemini.clone())),
            CooldownTracker::new(window, clock),
            deadline,
        );

        if !providers.any_configured() {
            info!("No AI provider configured; analysis will be rule-based");
        }

        Self::new(
            Orchestrator::new(openai, gemini),
            settings.analysis.large_file_threshold_bytes,
        )
    }

    /// Analyze one document.
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisReport, AnalysisError> {
        let request = normalize(request)?;

        let baseline = rules::analyze(&request);
        let run = self.orchestrator.run_hybrid(&request).await;
        let report = assemble::assemble(&request, baseline, run, self.large_file_threshold);

        info!(
            "Analyzed {} via {} ({})",
            request.filename,
            report.analysis_method.as_str(),
            report.suggested_classification
        );
        Ok(report)
    }

    /// Configuration and cooldown state of each provider.
    pub fn provider_status(&self) -> Vec<ProviderStatus> {
        self.orchestrator
            .adapters()
            .iter()
            .map(|adapter| adapter.status())
            .collect()
    }
}

fn normalize(mut request: AnalysisRequest) -> Result<AnalysisRequest, AnalysisError> {
    request.filename = request.filename.trim().to_string();
    if request.filename.is_empty() {
        return Err(AnalysisError::InvalidRequest(
            "filename is required".to_string(),
        ));
    }
    if request.declared_category.trim().is_empty() {
        request.declared_category = DEFAULT_CATEGORY.to_string();
    }
    Ok(request)
}
