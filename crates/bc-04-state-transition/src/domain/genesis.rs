//! # Initial Transition
//!
//! Seeds the genesis state: validators come from the registry at the
//! configured main-chain reference, committees are shuffled with the zero
//! seed from shard 0, and every shard starts with an empty crosslink.

use std::sync::Arc;

use shared_types::{BeaconState, Block, ChainConfig, Crosslink, ZERO_HASH};
use tracing::info;

use crate::error::{TransitionError, TransitionResult};
use crate::ports::{BlockTransition, CommitteeFactory, ValidatorRegistry};

pub struct InitialTransition {
    registry: Arc<dyn ValidatorRegistry>,
    committees: Arc<dyn CommitteeFactory>,
    config: ChainConfig,
}

impl InitialTransition {
    pub fn new(
        registry: Arc<dyn ValidatorRegistry>,
        committees: Arc<dyn CommitteeFactory>,
        config: ChainConfig,
    ) -> Self {
        Self {
            registry,
            committees,
            config,
        }
    }

    /// Genesis block applied to the empty state.
    pub fn genesis_state(&self) -> TransitionResult<BeaconState> {
        self.apply_block(&Block::genesis(), BeaconState::empty(&self.config))
    }
}

impl BlockTransition for InitialTransition {
    fn apply_block(&self, block: &Block, state: BeaconState) -> TransitionResult<BeaconState> {
        if !block.is_genesis() {
            return Err(TransitionError::NotGenesis { slot: block.slot });
        }

        let registered = self.registry.query(&self.config.genesis_main_chain_ref)?;
        let validator_set = state.validator_set.with_registered(registered);
        let committees = self
            .committees
            .create(&ZERO_HASH, &validator_set.active_indices(), 0);

        info!(
            validators = validator_set.len(),
            "[bc-04] Genesis state initialized"
        );

        Ok(state
            .with_validator_set(validator_set)
            .with_committees(committees)
            .with_last_state_recalc(0)
            .with_crosslinks(vec![Crosslink::empty(); self.config.shard_count as usize])
            .with_genesis_time(self.config.genesis_time))
    }
}
