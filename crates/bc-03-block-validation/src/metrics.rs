//! # Block Validation Metrics
//!
//! Enable with the `metrics` feature.
//!
//! - `block_validation_verdicts_total{result}` - Counter of verdicts by kind

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter_vec, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Verdicts by result label
    pub static ref VALIDATION_VERDICTS: IntCounterVec = register_int_counter_vec!(
        "block_validation_verdicts_total",
        "Total number of block validation verdicts by result",
        &["result"]
    )
    .expect("Failed to create VALIDATION_VERDICTS metric");
}

/// Record a validation verdict
#[cfg(feature = "metrics")]
pub fn record_verdict(result: &str) {
    VALIDATION_VERDICTS.with_label_values(&[result]).inc();
}

#[cfg(not(feature = "metrics"))]
pub fn record_verdict(_result: &str) {}
