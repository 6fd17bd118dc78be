//! Driving ports (Inbound API)

use shared_types::{BeaconState, Block};

use crate::error::TransitionResult;

/// Folds a block into the state produced by its parent.
///
/// Implementations are pure over `(block, state)` apart from the
/// collaborators they were built with.
pub trait BlockTransition: Send + Sync {
    fn apply_block(&self, block: &Block, state: BeaconState) -> TransitionResult<BeaconState>;
}
