//! Error types for the Committee Shuffler

use thiserror::Error;

/// Shuffler configuration errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShufflingError {
    /// A parameter the table layout divides by is zero
    #[error("Shuffling parameter {name} must be non-zero")]
    ZeroParameter { name: &'static str },

    /// Fewer shards than slots per cycle leaves slots without a shard
    #[error("Shard count {shard_count} is below cycle length {cycle_length}")]
    TooFewShards { shard_count: u64, cycle_length: u64 },
}

/// Result type for shuffler operations
pub type ShufflingResult<T> = Result<T, ShufflingError>;
