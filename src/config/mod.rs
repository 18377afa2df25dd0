//! Configuration management.
//!
//! Settings come from an optional TOML file, then environment overrides.
//! `.env` files are loaded by the binary before any of this runs.

mod providers;
mod settings;

pub use providers::{GeminiConfig, OpenAiConfig, ProvidersConfig};
pub use settings::{
    find_config_file, load_settings, AnalysisSettings, ConfigError, ServerConfig, Settings,
};
