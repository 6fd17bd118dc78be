//! # Adapters Layer (Hexagonal Architecture)
//!
//! Binds the duty ports to the chain processor and the attestation pool.

use bc_02_attestation_pool::AttestationPool;
use bc_04_state_transition::ChainProcessor;
use shared_types::{AttestationRecord, BeaconState, Block, Slot};

use crate::error::DutyResult;
use crate::ports::{AttestationSource, HeadProvider};

impl HeadProvider for ChainProcessor {
    fn head_state(&self) -> DutyResult<(Block, BeaconState)> {
        Ok(ChainProcessor::head_state(self)?)
    }
}

impl AttestationSource for AttestationPool {
    fn attestations_for(&self, slot: Slot, last_justified_slot: Slot) -> Vec<AttestationRecord> {
        self.get_attestations(slot, last_justified_slot)
    }
}
