//! # Error Types
//!
//! Errors shared by every subsystem. All of them belong to the fatal class:
//! they signal corrupted bytes, a broken store or an unusable configuration,
//! never a block that merely fails validation.

use rlp::DecoderError;
use thiserror::Error;

use crate::entities::Hash;

/// Errors raised while decoding canonical bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The RLP structure itself is malformed.
    #[error("Malformed canonical encoding: {0}")]
    Malformed(#[from] DecoderError),

    /// Extra bytes followed a complete item.
    #[error("Trailing bytes: item spans {item_len} of {input_len} bytes")]
    TrailingBytes { item_len: usize, input_len: usize },
}

/// Errors raised by storage collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Stored bytes failed to decode.
    #[error("Corrupted entry {key}: {source}")]
    Corrupted {
        key: String,
        #[source]
        source: CodecError,
    },

    /// A flattened state referenced a validator set that is not stored.
    #[error("Validator set not found: {}", hex::encode(.0))]
    MissingValidatorSet(Hash),
}

/// Errors raised when protocol parameters are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A parameter that must be positive was zero.
    #[error("{name} must be greater than zero")]
    Zero { name: &'static str },

    /// Each slot of a cycle needs at least one shard.
    #[error("shard_count ({shard_count}) must be at least cycle_length ({cycle_length})")]
    TooFewShards { shard_count: u16, cycle_length: u64 },

    /// The beacon chain id must not collide with a real shard.
    #[error("beacon_chain_shard_id ({id}) collides with shard range 0..{shard_count}")]
    ShardIdCollision { id: u16, shard_count: u16 },

    /// The inclusion window would be empty.
    #[error("min_attestation_inclusion_delay ({delay}) must be below cycle_length ({cycle_length})")]
    InclusionDelayTooLarge { delay: u64, cycle_length: u64 },

    /// An override was present but could not be parsed.
    #[error("{key}={value:?} is not a valid value")]
    InvalidValue { key: &'static str, value: String },
}

/// Result alias for decoding.
pub type CodecResult<T> = Result<T, CodecError>;

/// Result alias for storage access.
pub type StorageResult<T> = Result<T, StorageError>;
