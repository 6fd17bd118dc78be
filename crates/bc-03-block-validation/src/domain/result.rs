//! Validation verdicts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of validating a candidate block. Every variant except `Success`
/// means "reject this block".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationResult {
    Success,
    /// The parent block is not in the store.
    UnknownParent,
    /// No proposer is assigned to the block's slot.
    InvalidProposerIndex,
    InvalidProposerSignature,
    InvalidRandaoReveal,
    InvalidAttestations,
}

impl ValidationResult {
    pub fn is_success(self) -> bool {
        self == Self::Success
    }

    /// Stable label for logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::UnknownParent => "unknown_parent",
            Self::InvalidProposerIndex => "invalid_proposer_index",
            Self::InvalidProposerSignature => "invalid_proposer_signature",
            Self::InvalidRandaoReveal => "invalid_randao_reveal",
            Self::InvalidAttestations => "invalid_attestations",
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
