//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{HistoryKind, PortalConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Overrides `history.base`, mirroring the build-time base URL of the web app.
pub const ENV_BASE_URL: &str = "BASE_URL";

/// Overrides `history.mode` ("web" or "hash").
pub const ENV_HISTORY: &str = "ROUTER_HISTORY";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value `{value}` for {var}")]
    InvalidEnv { var: &'static str, value: String },
    #[error(
        "Validation failed: {}",
        .0.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
    )]
    Validation(Vec<ValidationError>),
}

/// Load, override from the environment and validate a TOML file.
pub fn load_config(path: &Path) -> Result<PortalConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: PortalConfig = toml::from_str(&content)?;
    finalize(config, |key| std::env::var(key).ok())
}

/// Load from `path` when given, otherwise start from defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<PortalConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => finalize(PortalConfig::default(), |key| std::env::var(key).ok()),
    }
}

/// Apply environment overrides through `lookup`, then validate.
pub fn finalize<F>(mut config: PortalConfig, lookup: F) -> Result<PortalConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(base) = lookup(ENV_BASE_URL) {
        tracing::debug!(base = %base, "history.base overridden from environment");
        config.history.base = base;
    }
    if let Some(mode) = lookup(ENV_HISTORY) {
        config.history.mode = mode
            .parse::<HistoryKind>()
            .map_err(|value| ConfigError::InvalidEnv {
                var: ENV_HISTORY,
                value,
            })?;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
