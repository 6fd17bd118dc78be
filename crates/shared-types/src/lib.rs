//! # Shared Types Crate
//!
//! Consensus entities, the canonical codec and the storage ports shared by
//! every beacon subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every entity that crosses a subsystem
//!   boundary is defined here, together with its canonical encoding.
//! - **Determinism**: identical logical content always produces identical
//!   bytes and therefore identical hashes on every node.
//! - **Value Semantics**: `BeaconState` and `ValidatorSet` are immutable
//!   values; updates return new instances.
//!
//! ## Modules
//!
//! - `entities`: Block, BeaconState, FlattenedState, ValidatorSet, Committee,
//!   Crosslink, attestations, proposal signed data, bitfields
//! - `codec`: RLP-based canonical encoding helpers
//! - `hashing`: BLAKE2b-256 digests and hash chains
//! - `config`: protocol parameters (`ChainConfig`)
//! - `storage`: block store / state repository ports and in-memory adapters
//! - `errors`: codec, storage and configuration errors

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod codec;
pub mod config;
pub mod entities;
pub mod errors;
pub mod hashing;
pub mod storage;

pub use config::ChainConfig;
pub use entities::*;
pub use errors::*;
pub use hashing::{hash_chain, blake2b256, ZERO_HASH};
