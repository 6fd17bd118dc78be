//! Node-level Prometheus registry.
//!
//! Subsystem crates register their own collectors on the prometheus default
//! registry behind their `metrics` features. This module owns the node-wide
//! metrics and renders both registries as one text exposition.

use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder};

use crate::{TelemetryConfig, TelemetryError};

lazy_static! {
    /// Node-wide registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Constant 1, labelled with the running service and network
    pub static ref NODE_INFO: IntGaugeVec = IntGaugeVec::new(
        Opts::new("beacon_node_info", "Beacon node identity"),
        &["service", "network"]
    ).expect("metric creation failed");

    /// Errors surfaced to the node, by subsystem and kind
    pub static ref SUBSYSTEM_ERRORS: IntCounterVec = IntCounterVec::new(
        Opts::new("beacon_subsystem_errors_total", "Errors by subsystem and type"),
        &["subsystem", "error_type"]
    ).expect("metric creation failed");
}

/// Proof that the node metrics are registered.
#[derive(Debug)]
pub struct MetricsHandle {
    port: u16,
}

impl MetricsHandle {
    /// Port the exposition is meant to be served on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Current exposition text.
    pub fn render(&self) -> Result<String, TelemetryError> {
        encode_metrics()
    }
}

/// Register the node metrics with [`REGISTRY`].
///
/// Registering twice fails with [`TelemetryError::MetricsInit`].
pub fn register_metrics(config: &TelemetryConfig) -> Result<MetricsHandle, TelemetryError> {
    let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(NODE_INFO.clone()),
        Box::new(SUBSYSTEM_ERRORS.clone()),
    ];

    for collector in collectors {
        REGISTRY
            .register(collector)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }

    NODE_INFO
        .with_label_values(&[config.service_name.as_str(), config.network.as_str()])
        .set(1);

    Ok(MetricsHandle {
        port: config.metrics_port,
    })
}

/// Count an error reported by `subsystem`.
pub fn record_error(subsystem: &str, error_type: &str) {
    SUBSYSTEM_ERRORS
        .with_label_values(&[subsystem, error_type])
        .inc();
}

/// Encode node and subsystem metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let mut families = REGISTRY.gather();
    families.extend(prometheus::gather());

    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_then_render() {
        // Other tests in this binary may have registered already.
        let _ = register_metrics(&TelemetryConfig::default());
        record_error("bc-04", "parent_state_missing");

        let text = encode_metrics().unwrap();
        assert!(text.contains("beacon_node_info"));
        assert!(text.contains("beacon_subsystem_errors_total"));
        assert!(text.contains("bc-04"));
    }

    #[test]
    fn test_double_registration_fails() {
        let config = TelemetryConfig::default();
        let _ = register_metrics(&config);
        assert!(matches!(
            register_metrics(&config),
            Err(TelemetryError::MetricsInit(_))
        ));
    }

    #[test]
    fn test_record_error_counts() {
        let before = SUBSYSTEM_ERRORS
            .with_label_values(&["bc-02", "aggregation"])
            .get();
        record_error("bc-02", "aggregation");
        record_error("bc-02", "aggregation");
        let after = SUBSYSTEM_ERRORS
            .with_label_values(&["bc-02", "aggregation"])
            .get();
        assert_eq!(after - before, 2);
    }
}
