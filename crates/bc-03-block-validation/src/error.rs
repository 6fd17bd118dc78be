//! Error types for the Validation Pipeline
//!
//! A failing rule is not an error: it is a [`ValidationResult`] verdict.
//! Errors here mean the pipeline could not run at all.
//!
//! [`ValidationResult`]: crate::domain::ValidationResult

use shared_types::{Hash, StorageError};
use thiserror::Error;

/// Validation precondition failures
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The parent block is stored but its post-state is not
    #[error("Post-state of parent block {parent:?} is missing")]
    ParentStateMissing { parent: Hash },

    /// Stored bytes could not be decoded
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for validation operations
pub type ValidationOutcome = Result<crate::domain::ValidationResult, ValidationError>;
