//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the portal
//! router. All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::routing::{HistoryMode, MatchOptions, RouterOptions};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PortalConfig {
    /// History mode and base URL.
    pub history: HistoryConfig,

    /// Path matching behavior.
    pub matching: MatchOptions,

    /// Fallback server settings.
    pub server: ServerConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

impl PortalConfig {
    /// Options the router is constructed with.
    pub fn router_options(&self) -> RouterOptions {
        RouterOptions {
            history: self.history.to_mode(),
            matching: self.matching,
        }
    }
}

/// Which history strategy the application uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HistoryKind {
    #[default]
    Web,
    Hash,
}

impl FromStr for HistoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "web" | "history" => Ok(HistoryKind::Web),
            "hash" => Ok(HistoryKind::Hash),
            other => Err(other.to_string()),
        }
    }
}

/// History configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// "web" or "hash".
    pub mode: HistoryKind,

    /// Base URL the application is served under (e.g., "/portal/").
    pub base: String,
}

impl HistoryConfig {
    pub fn to_mode(&self) -> HistoryMode {
        match self.mode {
            HistoryKind::Web => HistoryMode::web(&self.base),
            HistoryKind::Hash => HistoryMode::hash(&self.base),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            mode: HistoryKind::Web,
            base: "/".to_string(),
        }
    }
}

/// Fallback server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Application shell served for every route. Built-in shell when unset.
    pub index_file: Option<PathBuf>,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            index_file: None,
            request_timeout_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human-readable format.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: PortalConfig = toml::from_str("").unwrap();
        assert_eq!(config.history.mode, HistoryKind::Web);
        assert_eq!(config.history.base, "/");
        assert!(!config.matching.strict);
        assert_eq!(config.server.request_timeout_secs, 30);
        assert!(config.server.index_file.is_none());
    }

    #[test]
    fn test_partial_config() {
        let config: PortalConfig = toml::from_str(
            r#"
            [history]
            mode = "hash"
            base = "/portal"

            [matching]
            sensitive = true
            "#,
        )
        .unwrap();

        assert_eq!(config.history.to_mode(), HistoryMode::hash("/portal/"));
        let options = config.router_options();
        assert!(options.matching.sensitive);
        assert!(!options.matching.strict);
    }

    #[test]
    fn test_history_kind_from_str() {
        assert_eq!("HASH".parse::<HistoryKind>(), Ok(HistoryKind::Hash));
        assert_eq!("history".parse::<HistoryKind>(), Ok(HistoryKind::Web));
        assert!("memory".parse::<HistoryKind>().is_err());
    }
}
