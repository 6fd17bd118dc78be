//! Driven ports (Outbound SPI)

use shared_types::{AttestationRecord, BeaconState, Block, Slot};

use crate::error::DutyResult;

pub use bc_04_state_transition::BlockTransition;
pub use shared_bus::EventPublisher;
pub use shared_crypto::SignatureProvider;

/// The canonical head and the state it produced.
pub trait HeadProvider: Send + Sync {
    fn head_state(&self) -> DutyResult<(Block, BeaconState)>;
}

/// Merged attestations ready for inclusion.
pub trait AttestationSource: Send + Sync {
    /// Attestations includable in a block at `slot`.
    fn attestations_for(&self, slot: Slot, last_justified_slot: Slot) -> Vec<AttestationRecord>;
}
