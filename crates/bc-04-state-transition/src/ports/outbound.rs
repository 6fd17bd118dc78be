//! Driven ports (Outbound SPI)

use shared_types::{Block, Hash, Validator, ValidatorSet};

use crate::error::TransitionResult;

pub use bc_01_shuffling::CommitteeFactory;
pub use shared_bus::EventPublisher;
pub use shared_types::storage::{BlockStore, StateRepository};

/// Registry of validators deposited on the main chain.
///
/// Read once, at genesis.
pub trait ValidatorRegistry: Send + Sync {
    /// Validators registered as of the main-chain block `main_chain_ref`.
    fn query(&self, main_chain_ref: &Hash) -> TransitionResult<Vec<Validator>>;
}

/// Validator set update applied whenever committees are recomputed.
///
/// This is where deposits and exits would be onboarded.
pub trait ValidatorSetTransition: Send + Sync {
    fn apply(&self, block: &Block, validator_set: ValidatorSet) -> ValidatorSet;
}
