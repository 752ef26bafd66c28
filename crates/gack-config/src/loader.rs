//! Configuration loader (defaults + file + env merge).

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use thiserror::Error;

use gack_types::DiagnosticError;

use crate::schema::GackConfig;

/// Single-token variable honoured for compatibility with classic setups.
pub const LEGACY_TOKEN_ENV: &str = "SLACK_API_TOKEN";

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The given config file does not exist.
    #[error("config file not found: {0}")]
    NotFound(String),
    /// Failed to load or merge configuration.
    #[error("configuration error: {0}")]
    Load(String),
    /// The configuration loaded but cannot be used.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl DiagnosticError for ConfigError {
    fn hint(&self) -> Option<String> {
        match self {
            ConfigError::NotFound(_) => Some("the --config path is wrong or relative to another directory".into()),
            ConfigError::Load(msg) if msg.contains("unknown field") => Some(
                "a key in the config file or a GACK_* environment variable is not recognised".into(),
            ),
            ConfigError::Load(_) => Some("the config file is not valid TOML or a value has the wrong type".into()),
            ConfigError::Invalid(_) => None,
        }
    }

    fn fix(&self) -> Option<String> {
        match self {
            ConfigError::NotFound(_) => Some("pass an absolute path, or omit --config to use defaults".into()),
            ConfigError::Load(_) => Some("check the file against `gack validate` and unset stray GACK_* variables".into()),
            ConfigError::Invalid(msg) if msg.contains("server.path") => {
                Some("set server.path to something like \"/\" or \"/slack/commands\"".into())
            }
            ConfigError::Invalid(_) => None,
        }
    }
}

/// Loads configuration by merging layers:
/// 1. Default values
/// 2. Config file (if given)
/// 3. Environment variables (GACK_ prefix, `_` separates sections)
///
/// If `SLACK_API_TOKEN` is set and non-empty, its value is appended to
/// `auth.tokens`. An empty value is ignored so that an unset variable never
/// turns into an accepted blank token.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if `config_path` does not exist and
/// `ConfigError::Load` if any layer fails to parse.
pub fn load_config(config_path: Option<&str>) -> Result<GackConfig, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(GackConfig::default()));

    if let Some(path) = config_path {
        if !Path::new(path).exists() {
            return Err(ConfigError::NotFound(path.to_string()));
        }
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed("GACK_").split("_"));

    let mut config: GackConfig = figment
        .extract()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    if let Ok(token) = std::env::var(LEGACY_TOKEN_ENV) {
        if !token.is_empty() && !config.auth.tokens.contains(&token) {
            config.auth.tokens.push(token);
        }
    }

    Ok(config)
}
