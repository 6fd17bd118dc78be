//! # Block Transition
//!
//! 1. Extend the recent block-hash window with the block's hash, once per
//!    slot since the parent (skipped when the parent is genesis).
//! 2. Record the block's attestations as pending and announce each one.
//! 3. Once a full cycle has passed since the last recalculation:
//!    recompute committees if the validator set change interval has passed,
//!    move the recalculation slot to the cycle start, drop attestations
//!    older than it and trim the hash window.

use std::sync::Arc;

use shared_bus::BeaconEvent;
use shared_types::hashing::short_hex;
use shared_types::{BeaconState, Block, ChainConfig};
use tracing::{debug, info};

use crate::adapters::IdentityValidatorSetTransition;
use crate::error::{TransitionError, TransitionResult};
use crate::metrics;
use crate::ports::{
    BlockStore, BlockTransition, CommitteeFactory, EventPublisher, ValidatorSetTransition,
};

/// The per-block state transition.
#[derive(Clone)]
pub struct StateTransition {
    store: Arc<dyn BlockStore>,
    committees: Arc<dyn CommitteeFactory>,
    validator_sets: Arc<dyn ValidatorSetTransition>,
    publisher: Arc<dyn EventPublisher>,
    config: ChainConfig,
}

impl StateTransition {
    pub fn new(
        store: Arc<dyn BlockStore>,
        committees: Arc<dyn CommitteeFactory>,
        publisher: Arc<dyn EventPublisher>,
        config: ChainConfig,
    ) -> Self {
        Self {
            store,
            committees,
            validator_sets: Arc::new(IdentityValidatorSetTransition),
            publisher,
            config,
        }
    }

    /// Replace the validator set update run at committee recomputation.
    pub fn with_validator_set_transition(
        mut self,
        validator_sets: Arc<dyn ValidatorSetTransition>,
    ) -> Self {
        self.validator_sets = validator_sets;
        self
    }

    /// Same transition announcing its events to `publisher` instead.
    pub fn with_publisher(mut self, publisher: Arc<dyn EventPublisher>) -> Self {
        self.publisher = publisher;
        self
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    fn cycle_transition(&self, block: &Block, state: BeaconState) -> BeaconState {
        let cycle_start = self.config.cycle_start_slot(block.slot);
        info!(
            slot = block.slot,
            prev_slot = state.last_state_recalc,
            "[bc-04] Cycle transition"
        );

        let recompute = block.slot.saturating_sub(state.validator_set_change_slot)
            >= self.config.min_validator_set_change_interval;

        let mut next = state;
        if recompute {
            info!(
                slot = block.slot,
                prev_slot = next.validator_set_change_slot,
                "[bc-04] Validator set change"
            );
            let validator_set = self.validator_sets.apply(block, next.validator_set.clone());
            let start_shard = u64::from(next.committees_end_shard()) + 1;
            // The proposer cannot know its own block hash before applying
            // the block, so the parent hash seeds the shuffle.
            let committees = self.committees.create(
                &block.parent_hash,
                &validator_set.active_indices(),
                start_shard,
            );
            next = next
                .with_validator_set_change_slot(cycle_start)
                .with_validator_set(validator_set)
                .with_committees(committees);
        }

        next = next.with_last_state_recalc(cycle_start);
        self.publisher
            .publish(BeaconEvent::StateRecalculated { slot: cycle_start });
        metrics::record_cycle_transition(recompute);

        next.remove_outdated_attestations()
            .trim_recent_block_hashes(self.config.recent_block_hashes_len())
    }
}

impl BlockTransition for StateTransition {
    fn apply_block(&self, block: &Block, state: BeaconState) -> TransitionResult<BeaconState> {
        let parent = self
            .store
            .get_by_hash(&block.parent_hash)?
            .ok_or(TransitionError::ParentBlockMissing {
                parent: block.parent_hash,
            })?;

        let mut next = state;
        if !parent.is_genesis() {
            next = next.append_recent_block_hashes(block.hash(), parent.slot, block.slot);
        }

        next = next.add_pending_attestations(&block.attestations, block.slot);
        for attestation in &block.attestations {
            self.publisher
                .publish(BeaconEvent::AttestationIncluded(attestation.clone()));
        }

        if block.slot.saturating_sub(next.last_state_recalc) >= self.config.cycle_length {
            next = self.cycle_transition(block, next);
        }

        metrics::record_block_applied();
        debug!(
            slot = block.slot,
            hash = %short_hex(&block.hash()),
            attestations = block.attestations.len(),
            "[bc-04] Block applied"
        );
        Ok(next)
    }
}
