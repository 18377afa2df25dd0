//! Document analysis command.

use console::style;

use crate::cli::icons::{classification, dim_arrow, info, success, warn};
use docmeta::analysis::DocumentAnalyzer;
use docmeta::config::Settings;
use docmeta::models::{AnalysisReport, AnalysisRequest};

/// Build a request from command-line arguments.
pub fn build_request(
    filename: String,
    category: String,
    title: String,
    file_type: String,
    size: Option<u64>,
) -> AnalysisRequest {
    AnalysisRequest {
        filename,
        declared_category: category,
        title,
        file_type_label: file_type,
        file_size: size,
    }
}

/// Analyze one document and print the report.
pub async fn cmd_analyze(
    settings: &Settings,
    request: AnalysisRequest,
    json: bool,
) -> anyhow::Result<()> {
    let analyzer = DocumentAnalyzer::from_settings(settings);

    if !json {
        println!(
            "{} Analyzing {}",
            info(),
            style(request.display_title()).bold()
        );
    }

    let report = analyzer.analyze(request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &AnalysisReport) {
    for warning in &report.warnings {
        println!("{} {}", warn(), style(warning).yellow());
    }

    let providers = if report.ai_providers.is_empty() {
        "rules".to_string()
    } else {
        report
            .ai_providers
            .iter()
            .map(|p| p.display_name())
            .collect::<Vec<_>>()
            .join(" + ")
    };
    println!(
        "{} {} analysis ({})",
        success(),
        report.analysis_method.as_str(),
        providers
    );

    println!();
    println!("  {}", report.summary);
    println!();

    println!(
        "  {:<16} {} ({:.0}% confidence)",
        "Classification:",
        classification(report.suggested_classification),
        report.classification_confidence * 100.0
    );
    if let Some(category) = &report.suggested_category {
        println!("  {:<16} {}", "Category:", category);
    }
    println!("  {:<16} {}", "Content type:", report.content_type);
    println!("  {:<16} {}", "Language:", report.language);
    println!("  {:<16} {}", "Priority:", report.priority);
    println!(
        "  {:<16} {:.2} ({})",
        "Sentiment:",
        report.sentiment_score,
        report.sentiment_label.as_str()
    );
    println!("  {:<16} {:.2}", "Readability:", report.readability_score);

    print_list("Tags", &report.suggested_tags);
    print_list("Topics", &report.key_topics);
    print_list("Security risks", &report.security_risks);
    print_list("Insights", &report.insights);
}

fn print_list(label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!();
    println!("  {}:", style(label).bold());
    for item in items {
        println!("    {} {}", dim_arrow(), item);
    }
}
