//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Mount point, assets and share persistence.
    pub server: ServerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Users accepted by the token authenticator.
    pub users: Vec<UserConfig>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Where the service is mounted and where its resources live.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Path prefix this instance owns (e.g. "/files"). Empty = root.
    pub base_url: String,

    /// Extra prefix added by an upstream proxy; only used when building
    /// links, never when matching requests.
    pub prefix_url: String,

    /// Directory holding `index.html`, `sw.js` and the `static/` bundle.
    pub assets_dir: PathBuf,

    /// JSON file the share store persists to. In-memory only when unset.
    pub shares_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            prefix_url: String::new(),
            assets_dir: PathBuf::from("assets"),
            shares_file: None,
        }
    }
}

impl ServerConfig {
    /// Public root of the service as seen by browsers, without trailing `/`.
    pub fn root_url(&self) -> String {
        let joined = format!("{}{}", self.prefix_url, self.base_url);
        joined.trim_end_matches('/').to_string()
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// A user known to the token authenticator.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct UserConfig {
    pub username: String,

    /// Bearer token presented by this user.
    pub token: String,

    /// Filesystem root the user's paths resolve under.
    pub scope: PathBuf,

    /// Path rules, evaluated in order; the last matching rule wins.
    pub rules: Vec<RuleConfig>,
}

/// A single allow/deny rule on a path prefix.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RuleConfig {
    pub path: String,
    pub allow: bool,
}
