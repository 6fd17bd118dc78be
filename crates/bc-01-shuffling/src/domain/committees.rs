//! # Committee Table Construction
//!
//! The shuffled validator list is cut into `cycle_length` slot groups, and
//! each slot group into `committees_per_slot` committees. Cuts are as even
//! as possible: group sizes differ by at most one.

use shared_types::{ChainConfig, Committee, CommitteeTable, Hash, ShardId, ValidatorIndex};
use tracing::debug;

use super::shuffle::shuffle_with_seed;
use crate::error::{ShufflingError, ShufflingResult};
use crate::ports::CommitteeFactory;

/// The subset of protocol parameters the shuffler reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShufflingParams {
    pub cycle_length: u64,
    pub shard_count: u64,
    pub min_committee_size: u64,
}

impl From<&ChainConfig> for ShufflingParams {
    fn from(config: &ChainConfig) -> Self {
        Self {
            cycle_length: config.cycle_length,
            shard_count: u64::from(config.shard_count),
            min_committee_size: config.min_committee_size,
        }
    }
}

impl ShufflingParams {
    /// Reject layouts the table cannot be built for.
    pub fn validate(&self) -> ShufflingResult<()> {
        for (name, value) in [
            ("cycle_length", self.cycle_length),
            ("shard_count", self.shard_count),
            ("min_committee_size", self.min_committee_size),
        ] {
            if value == 0 {
                return Err(ShufflingError::ZeroParameter { name });
            }
        }
        if self.shard_count < self.cycle_length {
            return Err(ShufflingError::TooFewShards {
                shard_count: self.shard_count,
                cycle_length: self.cycle_length,
            });
        }
        Ok(())
    }
}

/// Committees per slot for `validator_count` validators.
///
/// Aims for committees of about twice `min_committee_size`, never fewer than
/// one per slot, and never more than the shards available to a slot. No
/// split leaves a committee under `min_committee_size`; a slot group smaller
/// than that stays one committee.
pub fn committees_per_slot(validator_count: usize, params: &ShufflingParams) -> u64 {
    let cycle_length = params.cycle_length.max(1);
    let min_size = params.min_committee_size.max(1);
    let slot_size = validator_count as u64 / cycle_length;

    let target = slot_size / (min_size * 2) + 1;
    let by_size = (slot_size / min_size).max(1);
    let ceiling = (params.shard_count / cycle_length).max(1);
    target.min(by_size).clamp(1, ceiling)
}

/// Split `items` into `parts` contiguous groups of near-equal size.
fn split<T>(items: &[T], parts: usize) -> impl Iterator<Item = &[T]> {
    let len = items.len();
    (0..parts).map(move |i| &items[len * i / parts..len * (i + 1) / parts])
}

/// Production [`CommitteeFactory`].
#[derive(Clone, Debug)]
pub struct ShufflingCommitteeFactory {
    params: ShufflingParams,
}

impl ShufflingCommitteeFactory {
    pub fn new(params: ShufflingParams) -> ShufflingResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn from_config(config: &ChainConfig) -> ShufflingResult<Self> {
        Self::new(ShufflingParams::from(config))
    }

    pub fn params(&self) -> &ShufflingParams {
        &self.params
    }
}

impl CommitteeFactory for ShufflingCommitteeFactory {
    fn create(
        &self,
        seed: &Hash,
        validators: &[ValidatorIndex],
        start_shard: u64,
    ) -> CommitteeTable {
        let cycle_length = self.params.cycle_length as usize;

        if validators.is_empty() {
            return vec![Vec::new(); cycle_length];
        }

        let shuffled = shuffle_with_seed(validators, seed);
        let per_slot = committees_per_slot(validators.len(), &self.params);
        let shard_count = self.params.shard_count.max(1);

        let table: CommitteeTable = split(&shuffled, cycle_length)
            .enumerate()
            .map(|(i, slot_members)| {
                split(slot_members, per_slot as usize)
                    .enumerate()
                    .map(|(j, members)| {
                        let shard = (start_shard + i as u64 * per_slot + j as u64) % shard_count;
                        Committee::new(shard as ShardId, members.to_vec())
                    })
                    .collect()
            })
            .collect();

        debug!(
            validators = validators.len(),
            committees_per_slot = per_slot,
            start_shard,
            "[bc-01] committees created"
        );

        table
    }
}
