//! Provider status command.

use console::style;

use crate::cli::icons::{error, success, warn};
use docmeta::analysis::DocumentAnalyzer;
use docmeta::config::Settings;

/// Show whether each provider is configured and which model it uses.
///
/// Cooldown state lives in memory, so a fresh process always reports every
/// provider as available; `GET /api/providers` on a running server shows the
/// live state.
pub fn cmd_providers(settings: &Settings) -> anyhow::Result<()> {
    let analyzer = DocumentAnalyzer::from_settings(settings);

    println!("{}", style("AI providers").bold());
    for status in analyzer.provider_status() {
        let icon = if !status.configured {
            error()
        } else if status.cooldown.available {
            success()
        } else {
            warn()
        };
        let state = if !status.configured {
            style("not configured".to_string()).dim()
        } else {
            match status.cooldown.cooldown_until {
                Some(until) if !status.cooldown.available => {
                    let label = format!("cooling down until {}", until.to_rfc3339());
                    style(label).yellow()
                }
                _ => style("available".to_string()).green(),
            }
        };
        println!(
            "  {} {:<8} {:<24} {}",
            icon,
            status.provider.display_name(),
            status.model,
            state
        );
    }

    if !settings.providers.any_configured() {
        println!();
        println!(
            "  Set {} or {} to enable AI analysis.",
            style("OPENAI_API_KEY").cyan(),
            style("GEMINI_API_KEY").cyan()
        );
    }
    Ok(())
}
