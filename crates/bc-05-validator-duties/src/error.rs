//! Error types for Validator Duties

use bc_02_attestation_pool::PoolError;
use bc_04_state_transition::TransitionError;
use shared_crypto::CryptoError;
use shared_types::Slot;
use thiserror::Error;

/// Duty failures
#[derive(Debug, Error)]
pub enum DutyError {
    /// Proposals wait until the chain is synced
    #[error("Chain is not synced")]
    NotSynced,

    /// Another validator proposes at this slot
    #[error("Not the proposer for slot {slot}")]
    NotProposer { slot: Slot },

    /// The slot does not come after the head
    #[error("Slot {slot} is not after head slot {head_slot}")]
    StaleSlot { slot: Slot, head_slot: Slot },

    /// Our public key is not in the validator set
    #[error("Validator is not registered")]
    UnknownValidator,

    /// The local RANDAO chain is too short for the requested reveal
    #[error("RANDAO chain exhausted: {skips} skips requested, depth {depth}")]
    RandaoExhausted { skips: u64, depth: u64 },

    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Transition error: {0}")]
    Transition(#[from] TransitionError),

    #[error("Pool error: {0}")]
    Pool(#[from] PoolError),
}

/// Result type for duty operations
pub type DutyResult<T> = Result<T, DutyError>;
