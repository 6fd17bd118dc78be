//! Telemetry configuration from environment variables.

use std::env;

use serde::{Deserialize, Serialize};

/// Logging and metrics settings for a beacon node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// `EnvFilter` directive (trace, debug, info, or per-target lists)
    pub log_level: String,

    /// Emit JSON lines instead of the pretty console format
    pub json_logs: bool,

    /// Port the node exposes Prometheus text on
    pub metrics_port: u16,

    /// Network identifier (devnet, testnet, mainnet)
    pub network: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "beacon-core".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            metrics_port: 9100,
            network: "devnet".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `BC_SERVICE_NAME`: Service name (default: beacon-core)
    /// - `BC_LOG_LEVEL` or `RUST_LOG`: Filter directive (default: info)
    /// - `BC_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `BC_METRICS_PORT`: Prometheus metrics port (default: 9100)
    /// - `BC_NETWORK`: Network name (default: devnet)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            service_name: lookup("BC_SERVICE_NAME").unwrap_or(defaults.service_name),

            log_level: lookup("BC_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            json_logs: lookup("BC_JSON_LOGS")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(defaults.json_logs),

            metrics_port: lookup("BC_METRICS_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.metrics_port),

            network: lookup("BC_NETWORK").unwrap_or(defaults.network),
        }
    }

    /// Service name qualified by network, e.g. `beacon-core-devnet`.
    pub fn full_service_name(&self) -> String {
        format!("{}-{}", self.service_name, self.network)
    }
}
