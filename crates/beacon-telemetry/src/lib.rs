//! # beacon-telemetry
//!
//! Logging and metrics plumbing for a beacon node.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use beacon_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let metrics = init_telemetry(&TelemetryConfig::from_env())?;
//! tracing::info!(port = metrics.port(), "[node] started");
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `BC_LOG_LEVEL` / `RUST_LOG` | `info` | `EnvFilter` directive |
//! | `BC_JSON_LOGS` | `false` | JSON lines output |
//! | `BC_METRICS_PORT` | `9100` | Prometheus port |
//! | `BC_SERVICE_NAME` | `beacon-core` | Service label |
//! | `BC_NETWORK` | `devnet` | Network label |

mod config;
mod logging;
mod metrics;

pub use config::TelemetryConfig;
pub use logging::{env_filter, init_logging};
pub use metrics::{
    encode_metrics, record_error, register_metrics, MetricsHandle, NODE_INFO, REGISTRY,
    SUBSYSTEM_ERRORS,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Install logging and register node metrics.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<MetricsHandle, TelemetryError> {
    init_logging(config)?;
    let handle = register_metrics(config)?;

    tracing::info!(
        service = %config.full_service_name(),
        metrics_port = config.metrics_port,
        "Telemetry initialized"
    );
    Ok(handle)
}
