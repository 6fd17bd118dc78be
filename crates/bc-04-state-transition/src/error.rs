//! Error types for the State Transition Engine

use bc_03_block_validation::ValidationError;
use shared_types::{Hash, Slot, StorageError};
use thiserror::Error;

/// State transition and chain import failures
#[derive(Debug, Error)]
pub enum TransitionError {
    /// The block's parent is not stored
    #[error("Parent block {parent:?} is missing")]
    ParentBlockMissing { parent: Hash },

    /// The parent is stored but the state it produced is not
    #[error("Post-state of parent block {parent:?} is missing")]
    ParentStateMissing { parent: Hash },

    /// The initial transition was handed a non-genesis block
    #[error("Initial transition requires the genesis block, got slot {slot}")]
    NotGenesis { slot: Slot },

    /// The chain processor was used before genesis was stored
    #[error("Chain is not initialized")]
    NotInitialized,

    /// The validator registry could not be read
    #[error("Validator registry error: {0}")]
    ValidatorRegistry(String),

    /// Stored bytes could not be decoded
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Validation could not run
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl TransitionError {
    /// Whether the caller broke a precondition (wrong order, wrong entry
    /// point) rather than the store or registry being broken.
    pub fn is_precondition(&self) -> bool {
        match self {
            Self::ParentBlockMissing { .. }
            | Self::ParentStateMissing { .. }
            | Self::NotGenesis { .. }
            | Self::NotInitialized => true,
            Self::Validation(inner) => matches!(inner, ValidationError::ParentStateMissing { .. }),
            Self::ValidatorRegistry(_) | Self::Storage(_) => false,
        }
    }
}

/// Result type for transition operations
pub type TransitionResult<T> = Result<T, TransitionError>;
