//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod analyze;
mod config_cmd;
mod providers;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use docmeta::config::load_settings;

#[derive(Parser)]
#[command(name = "docmeta")]
#[command(about = "Document metadata analysis with hybrid AI providers")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true, env = "DOCMETA_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a document's metadata
    Analyze {
        /// Document filename (e.g. "Payroll_Confidential_2024.pdf")
        filename: String,
        /// Category the document was filed under
        #[arg(short = 'C', long, default_value = "")]
        category: String,
        /// Document title (defaults to the filename)
        #[arg(short, long, default_value = "")]
        title: String,
        /// Detected file type label (e.g. "PDF Document")
        #[arg(short = 'f', long, default_value = "")]
        file_type: String,
        /// File size in bytes
        #[arg(short, long)]
        size: Option<u64>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show provider configuration and cooldown state
    Providers,

    /// Start the HTTP API server
    Serve {
        /// Bind address: host, port, or host:port (overrides config)
        bind: Option<String>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration with API keys redacted
    Show,
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Analyze {
            filename,
            category,
            title,
            file_type,
            size,
            json,
        } => {
            let request = analyze::build_request(filename, category, title, file_type, size);
            analyze::cmd_analyze(&settings, request, json).await
        }
        Commands::Providers => providers::cmd_providers(&settings),
        Commands::Serve { bind } => serve::cmd_serve(&settings, bind.as_deref()).await,
        Commands::Config { command } => match command {
            ConfigCommands::Show => {
                config_cmd::cmd_config_show(&settings, cli.config.as_deref()).await
            }
        },
    }
}
