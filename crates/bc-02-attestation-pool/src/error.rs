//! Error types for the Attestation Pool

use shared_crypto::CryptoError;
use thiserror::Error;

/// Attestation pool errors
#[derive(Debug, Error)]
pub enum PoolError {
    /// Only unmerged, single-voter records may enter the pool
    #[error("Expected a single vote, bitfield carries {votes}")]
    NotSingleVote { votes: usize },

    /// Signature aggregation failed for a fingerprint
    #[error("Signature aggregation failed: {0}")]
    Aggregation(#[from] CryptoError),
}

/// Result type for pool operations
pub type PoolResult<T> = Result<T, PoolError>;
