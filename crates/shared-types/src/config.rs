//! # Protocol Parameters
//!
//! Every constant the consensus rules depend on lives in `ChainConfig`.
//! `Default` yields the protocol values; `minimal()` is a small profile for
//! tests and local networks; `from_env()` overrides individual parameters.
//!
//! ## Environment Variables
//!
//! | Variable | Parameter |
//! |----------|-----------|
//! | `BC_CYCLE_LENGTH` | `cycle_length` |
//! | `BC_SHARD_COUNT` | `shard_count` |
//! | `BC_MIN_COMMITTEE_SIZE` | `min_committee_size` |
//! | `BC_MIN_VALIDATOR_SET_CHANGE_INTERVAL` | `min_validator_set_change_interval` |
//! | `BC_MIN_ATTESTATION_INCLUSION_DELAY` | `min_attestation_inclusion_delay` |
//! | `BC_MAX_ATTESTATION_COUNT` | `max_attestation_count` |
//! | `BC_BEACON_CHAIN_SHARD_ID` | `beacon_chain_shard_id` |
//! | `BC_GENESIS_TIME` | `genesis_time` |
//! | `BC_EVENT_BUS_CAPACITY` | `event_bus_capacity` |

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entities::{Hash, ShardId, Slot};
use crate::errors::ConfigError;
use crate::hashing::ZERO_HASH;

/// Protocol parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Slots per cycle.
    pub cycle_length: u64,
    /// Number of shards.
    pub shard_count: ShardId,
    /// Target lower bound on committee size.
    pub min_committee_size: u64,
    /// Minimum slots between two committee recomputations.
    pub min_validator_set_change_interval: u64,
    /// Slots an attestation must wait before inclusion.
    pub min_attestation_inclusion_delay: u64,
    /// Maximum attestations per block.
    pub max_attestation_count: usize,
    /// Shard id reserved for the beacon chain in proposal signatures.
    pub beacon_chain_shard_id: ShardId,
    /// Genesis timestamp (unix seconds).
    pub genesis_time: u64,
    /// Main chain block the genesis validator registry is read at.
    pub genesis_main_chain_ref: Hash,
    /// Events a bus subscriber may fall behind before it starts losing them.
    #[serde(default = "default_event_bus_capacity")]
    pub event_bus_capacity: usize,
}

fn default_event_bus_capacity() -> usize {
    1000
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            cycle_length: 64,
            shard_count: 1024,
            min_committee_size: 128,
            min_validator_set_change_interval: 256,
            min_attestation_inclusion_delay: 4,
            max_attestation_count: 128,
            beacon_chain_shard_id: ShardId::MAX,
            genesis_time: 1_535_454_832,
            genesis_main_chain_ref: ZERO_HASH,
            event_bus_capacity: default_event_bus_capacity(),
        }
    }
}

impl ChainConfig {
    /// Small parameters for tests and local networks.
    pub fn minimal() -> Self {
        Self {
            cycle_length: 8,
            shard_count: 16,
            min_committee_size: 2,
            min_validator_set_change_interval: 16,
            min_attestation_inclusion_delay: 1,
            max_attestation_count: 16,
            ..Self::default()
        }
    }

    /// Defaults overridden by any `BC_*` variables present, then validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary key lookup.
    ///
    /// A present but unparsable value is an error, never a silent default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            cycle_length: parse_or(&lookup, "BC_CYCLE_LENGTH", defaults.cycle_length)?,
            shard_count: parse_or(&lookup, "BC_SHARD_COUNT", defaults.shard_count)?,
            min_committee_size: parse_or(
                &lookup,
                "BC_MIN_COMMITTEE_SIZE",
                defaults.min_committee_size,
            )?,
            min_validator_set_change_interval: parse_or(
                &lookup,
                "BC_MIN_VALIDATOR_SET_CHANGE_INTERVAL",
                defaults.min_validator_set_change_interval,
            )?,
            min_attestation_inclusion_delay: parse_or(
                &lookup,
                "BC_MIN_ATTESTATION_INCLUSION_DELAY",
                defaults.min_attestation_inclusion_delay,
            )?,
            max_attestation_count: parse_or(
                &lookup,
                "BC_MAX_ATTESTATION_COUNT",
                defaults.max_attestation_count,
            )?,
            beacon_chain_shard_id: parse_or(
                &lookup,
                "BC_BEACON_CHAIN_SHARD_ID",
                defaults.beacon_chain_shard_id,
            )?,
            genesis_time: parse_or(&lookup, "BC_GENESIS_TIME", defaults.genesis_time)?,
            genesis_main_chain_ref: defaults.genesis_main_chain_ref,
            event_bus_capacity: parse_or(
                &lookup,
                "BC_EVENT_BUS_CAPACITY",
                defaults.event_bus_capacity,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject parameter combinations the consensus rules cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cycle_length == 0 {
            return Err(ConfigError::Zero {
                name: "cycle_length",
            });
        }
        if self.shard_count == 0 {
            return Err(ConfigError::Zero {
                name: "shard_count",
            });
        }
        if self.min_committee_size == 0 {
            return Err(ConfigError::Zero {
                name: "min_committee_size",
            });
        }
        if self.event_bus_capacity == 0 {
            return Err(ConfigError::Zero {
                name: "event_bus_capacity",
            });
        }
        if u64::from(self.shard_count) < self.cycle_length {
            return Err(ConfigError::TooFewShards {
                shard_count: self.shard_count,
                cycle_length: self.cycle_length,
            });
        }
        if self.beacon_chain_shard_id < self.shard_count {
            return Err(ConfigError::ShardIdCollision {
                id: self.beacon_chain_shard_id,
                shard_count: self.shard_count,
            });
        }
        if self.min_attestation_inclusion_delay >= self.cycle_length {
            return Err(ConfigError::InclusionDelayTooLarge {
                delay: self.min_attestation_inclusion_delay,
                cycle_length: self.cycle_length,
            });
        }
        Ok(())
    }

    /// Fixed length of the recent block-hash window.
    pub fn recent_block_hashes_len(&self) -> usize {
        (self.cycle_length * 2) as usize
    }

    /// First slot of the cycle containing `slot`.
    pub fn cycle_start_slot(&self, slot: Slot) -> Slot {
        slot - slot % self.cycle_length
    }

    /// Whether an attestation made at `attestation_slot` may be included in
    /// a block at `block_slot`:
    /// `max(0, B - CYCLE_LENGTH + 1) <= S <= max(0, B - MIN_ATTESTATION_INCLUSION_DELAY)`.
    pub fn is_attestation_acceptable(&self, attestation_slot: Slot, block_slot: Slot) -> bool {
        let earliest = (block_slot + 1).saturating_sub(self.cycle_length);
        let latest = block_slot.saturating_sub(self.min_attestation_inclusion_delay);
        attestation_slot >= earliest && attestation_slot <= latest
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
    }
}
