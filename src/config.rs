//! Configuration loading
//!
//! Reads `~/.config/sql-autocomplete/config.toml` (or an explicit path),
//! applies environment fallbacks, and resolves the schema description.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::AppError;

pub mod types;

pub use types::{AiConfig, AiProviderType, Config, GroqConfig, RelayClientConfig};

const CONFIG_DIR: &str = "sql-autocomplete";
const CONFIG_FILE: &str = "config.toml";

/// Environment variable consulted when `[ai.groq] api_key` is missing
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load configuration
///
/// An explicit path must exist. The default path is optional: when it is
/// missing, defaults are used. Invalid TOML is always an error.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, AppError> {
    let mut config = match explicit {
        Some(path) => load_config_from_path(path)?,
        None => match config_path() {
            Some(path) if path.exists() => load_config_from_path(&path)?,
            _ => Config::default(),
        },
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

pub fn load_config_from_path(path: &Path) -> Result<Config, AppError> {
    let contents = fs::read_to_string(path).map_err(|e| AppError::Config {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    parse_config_toml(&contents).map_err(|message| AppError::Config {
        path: path.display().to_string(),
        message,
    })
}

pub fn parse_config_toml(content: &str) -> Result<Config, String> {
    toml::from_str::<Config>(content).map_err(|e| e.to_string())
}

/// Fill gaps in the config from the environment
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let has_key = config
        .ai
        .groq
        .api_key
        .as_ref()
        .is_some_and(|k| !k.trim().is_empty());

    if !has_key && let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
        config.ai.groq.api_key = Some(key);
    }
}

/// Resolve the schema description for this session
///
/// A schema file wins over an inline description; with neither, the
/// built-in `events` table is used. The text is passed on unmodified.
pub fn resolve_schema(config: &Config) -> Result<Arc<str>, AppError> {
    if let Some(path) = &config.schema.path {
        let text = fs::read_to_string(path).map_err(|e| AppError::Schema {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        return Ok(Arc::from(text));
    }

    Ok(match &config.schema.description {
        Some(description) => Arc::from(description.as_str()),
        None => Arc::from(types::DEFAULT_SCHEMA),
    })
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
