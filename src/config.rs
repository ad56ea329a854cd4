//! Startup configuration: the service registry plus server and timeout
//! settings, loaded from a JSON file.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::registry::ServiceAddr;

/// Configuration errors, all of them fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("Failed to parse config file {path}: {reason}")]
    ParseFailed { path: String, reason: String },

    #[error("Validation failed: {reason}")]
    ValidationFailed { reason: String },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Router configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Per-call forwarding timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Timeout for the direct search pass-through in seconds
    #[serde(default = "default_search_timeout_secs")]
    pub search_timeout_secs: u64,
    /// Registry name of the service backing `/mcp/execute-search`
    #[serde(default = "default_search_service")]
    pub search_service: String,
    /// Interval of the periodic stats log line in seconds (0 disables it)
    #[serde(default = "default_log_interval_secs")]
    pub log_interval_secs: u64,
    /// The service registry: logical name to host and port
    pub services: HashMap<String, ServiceAddr>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_search_timeout_secs() -> u64 {
    15
}

fn default_search_service() -> String {
    "searxng-api".to_string()
}

fn default_log_interval_secs() -> u64 {
    60
}

impl RouterConfig {
    /// Loads and validates a configuration file. Any failure here must keep
    /// the process from starting.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config: RouterConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::ParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.services.is_empty() {
            return Err(ConfigError::ValidationFailed {
                reason: "service registry must contain at least one service".to_string(),
            });
        }
        for (name, addr) in &self.services {
            if name.is_empty() {
                return Err(ConfigError::ValidationFailed {
                    reason: "service names must not be empty".to_string(),
                });
            }
            if addr.host.is_empty() {
                return Err(ConfigError::ValidationFailed {
                    reason: format!("service '{}' has an empty host", name),
                });
            }
            if addr.port == 0 {
                return Err(ConfigError::ValidationFailed {
                    reason: format!("service '{}' has port 0", name),
                });
            }
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed {
                reason: "request_timeout_secs must be greater than 0".to_string(),
            });
        }
        if self.search_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed {
                reason: "search_timeout_secs must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}
