//! Configuration management commands.

use std::path::Path;

use console::style;

use crate::cli::icons::dim_arrow;
use docmeta::config::{find_config_file, Settings};

/// Print the effective configuration as TOML, API keys redacted.
pub async fn cmd_config_show(settings: &Settings, explicit: Option<&Path>) -> anyhow::Result<()> {
    match find_config_file(explicit).await {
        Some(path) => eprintln!("{} Config file: {}", dim_arrow(), path.display()),
        None => eprintln!(
            "{} No config file found, showing defaults with environment overrides",
            dim_arrow()
        ),
    }

    let text = toml::to_string_pretty(&settings.redacted())?;
    println!("{}", style(text.trim_end()).dim());
    Ok(())
}
