//! # bc-01-shuffling
//!
//! Committee Shuffler: assigns every active validator to exactly one
//! committee per cycle, and every committee to a shard.
//!
//! ## Overview
//!
//! ```text
//! seed ──┐
//!        ├──→ Fisher-Yates ──→ split by slot ──→ split by committee ──→ CommitteeTable
//! indices┘                    (CYCLE_LENGTH)     (committees_per_slot)   [slot][committee]
//! ```
//!
//! Shard ids are handed out contiguously from `start_shard`, wrapping at
//! `shard_count`. Identical inputs always yield an identical table: every
//! node derives committees independently and must agree byte for byte.
//!
//! ## Lookups
//!
//! - [`proposer_index`]: first member of the first committee at a slot
//! - [`scan_committees`]: committee for a (slot offset, shard) pair
//! - [`find_assignment`]: where a given validator sits in the table

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod domain;
pub mod error;
pub mod ports;

pub use domain::{
    committees_per_slot, find_assignment, proposer_index, scan_committees, shuffle_with_seed,
    CommitteeAssignment, ShufflingCommitteeFactory, ShufflingParams,
};
pub use error::{ShufflingError, ShufflingResult};
pub use ports::CommitteeFactory;
