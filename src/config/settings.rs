//! Top-level settings and config file discovery.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::providers::ProvidersConfig;

/// Errors loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Application settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Heuristic thresholds for the rule-based side of analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Files larger than this get a size-related security risk.
    #[serde(default = "default_large_file_threshold")]
    pub large_file_threshold_bytes: u64,
}

fn default_large_file_threshold() -> u64 {
    50 * 1024 * 1024
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            large_file_threshold_bytes: default_large_file_threshold(),
        }
    }
}

/// HTTP server bind settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3030
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply process environment overrides.
    pub fn with_env_overrides(self) -> Self {
        self.with_env_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source.
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        self.providers.apply_env(&lookup);
        self
    }

    /// Copy with API keys replaced, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.providers.openai.api_key.is_some() {
            copy.providers.openai.api_key = Some("********".to_string());
        }
        if copy.providers.gemini.api_key.is_some() {
            copy.providers.gemini.api_key = Some("********".to_string());
        }
        copy
    }
}

/// Find the config file to use, if any.
///
/// An explicit path wins; otherwise prefer searches its standard locations
/// for a `docmeta` config.
pub async fn find_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    match prefer::load("docmeta").await {
        Ok(found) => found.source_path().cloned(),
        Err(e) => {
            debug!("No config discovered: {}", e);
            None
        }
    }
}

/// Load settings from the discovered config file and the environment.
///
/// A missing explicit path is an error; a missing discovered file just means
/// defaults.
pub async fn load_settings(explicit: Option<&Path>) -> Result<Settings, ConfigError> {
    let settings = match find_config_file(explicit).await {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            let text = tokio::fs::read_to_string(&path)
                .await
                .map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
            Settings::from_toml(&text, &path)?
        }
        None => {
            debug!("No config file found, using defaults");
            Settings::default()
        }
    };

    Ok(settings.with_env_overrides())
}
