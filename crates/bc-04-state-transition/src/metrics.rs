//! # State Transition Metrics
//!
//! Enable with the `metrics` feature.
//!
//! - `state_transition_blocks_applied_total` - Counter of applied blocks
//! - `state_transition_cycle_transitions_total` - Counter of cycle recalculations
//! - `state_transition_committee_recomputations_total` - Counter of committee shuffles
//! - `state_transition_head_slot` - Gauge of the canonical head slot

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_gauge, IntCounter, IntGauge};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Blocks folded into state
    pub static ref BLOCKS_APPLIED: IntCounter = register_int_counter!(
        "state_transition_blocks_applied_total",
        "Total number of blocks applied to beacon state"
    )
    .expect("Failed to create BLOCKS_APPLIED metric");

    /// Cycle recalculations
    pub static ref CYCLE_TRANSITIONS: IntCounter = register_int_counter!(
        "state_transition_cycle_transitions_total",
        "Total number of cycle transitions"
    )
    .expect("Failed to create CYCLE_TRANSITIONS metric");

    /// Committee recomputations
    pub static ref COMMITTEE_RECOMPUTATIONS: IntCounter = register_int_counter!(
        "state_transition_committee_recomputations_total",
        "Total number of committee recomputations"
    )
    .expect("Failed to create COMMITTEE_RECOMPUTATIONS metric");

    /// Canonical head slot
    pub static ref HEAD_SLOT: IntGauge = register_int_gauge!(
        "state_transition_head_slot",
        "Slot of the canonical head"
    )
    .expect("Failed to create HEAD_SLOT metric");
}

/// Record an applied block
#[cfg(feature = "metrics")]
pub fn record_block_applied() {
    BLOCKS_APPLIED.inc();
}

/// Record a cycle transition
#[cfg(feature = "metrics")]
pub fn record_cycle_transition(recomputed_committees: bool) {
    CYCLE_TRANSITIONS.inc();
    if recomputed_committees {
        COMMITTEE_RECOMPUTATIONS.inc();
    }
}

/// Set the canonical head slot
#[cfg(feature = "metrics")]
pub fn set_head_slot(slot: u64) {
    HEAD_SLOT.set(slot as i64);
}

#[cfg(not(feature = "metrics"))]
pub fn record_block_applied() {}

#[cfg(not(feature = "metrics"))]
pub fn record_cycle_transition(_recomputed_committees: bool) {}

#[cfg(not(feature = "metrics"))]
pub fn set_head_slot(_slot: u64) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_callable() {
        record_block_applied();
        record_cycle_transition(true);
        record_cycle_transition(false);
        set_head_slot(9);
    }
}
