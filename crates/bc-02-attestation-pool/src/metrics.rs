//! # Attestation Pool Metrics
//!
//! Enable with the `metrics` feature.
//!
//! - `attestation_pool_fingerprints` - Gauge of distinct vote contents held
//! - `attestation_pool_single_votes` - Gauge of single votes held
//! - `attestation_pool_rejected_total` - Counter of rejected submissions
//! - `attestation_pool_events_lagged_total` - Counter of bus events the pool
//!   missed by falling behind

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_gauge, IntCounter, IntGauge};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Distinct fingerprints in the pool
    pub static ref POOL_FINGERPRINTS: IntGauge = register_int_gauge!(
        "attestation_pool_fingerprints",
        "Number of distinct attestation data fingerprints in the pool"
    )
    .expect("Failed to create POOL_FINGERPRINTS metric");

    /// Single votes in the pool
    pub static ref POOL_SINGLE_VOTES: IntGauge = register_int_gauge!(
        "attestation_pool_single_votes",
        "Number of single-voter attestation records in the pool"
    )
    .expect("Failed to create POOL_SINGLE_VOTES metric");

    /// Submissions rejected as merged
    pub static ref POOL_REJECTED: IntCounter = register_int_counter!(
        "attestation_pool_rejected_total",
        "Total number of attestation submissions rejected by the pool"
    )
    .expect("Failed to create POOL_REJECTED metric");

    /// Bus events lost to subscriber lag
    pub static ref POOL_EVENTS_LAGGED: IntCounter = register_int_counter!(
        "attestation_pool_events_lagged_total",
        "Total number of bus events the attestation pool missed by lagging"
    )
    .expect("Failed to create POOL_EVENTS_LAGGED metric");
}

/// Update the pool size gauges
#[cfg(feature = "metrics")]
pub fn set_pool_size(fingerprints: usize, single_votes: usize) {
    POOL_FINGERPRINTS.set(fingerprints as i64);
    POOL_SINGLE_VOTES.set(single_votes as i64);
}

/// Record a rejected submission
#[cfg(feature = "metrics")]
pub fn record_rejected() {
    POOL_REJECTED.inc();
}

/// Record events lost to subscriber lag
#[cfg(feature = "metrics")]
pub fn record_lagged(count: u64) {
    POOL_EVENTS_LAGGED.inc_by(count);
}

#[cfg(not(feature = "metrics"))]
pub fn set_pool_size(_fingerprints: usize, _single_votes: usize) {}

#[cfg(not(feature = "metrics"))]
pub fn record_rejected() {}

#[cfg(not(feature = "metrics"))]
pub fn record_lagged(_count: u64) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_callable() {
        set_pool_size(3, 10);
        record_rejected();
        record_lagged(2);
    }
}
