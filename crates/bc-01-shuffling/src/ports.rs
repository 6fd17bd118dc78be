//! Driven port used by the state transition engine.

use shared_types::{CommitteeTable, Hash, ShardId, ValidatorIndex};

/// Builds the committee table for a cycle.
pub trait CommitteeFactory: Send + Sync {
    /// Assign `validators` to committees, seeded by `seed`, with shard ids
    /// starting at `start_shard`.
    fn create(&self, seed: &Hash, validators: &[ValidatorIndex], start_shard: u64)
        -> CommitteeTable;
}
