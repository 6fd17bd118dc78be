//! # Core Domain Entities
//!
//! Consensus entities of the beacon chain and their canonical encodings.
//!
//! ## Clusters
//!
//! - **Chain**: `Block`, `ProposalSignedData`
//! - **Votes**: `AttestationData`, `AttestationRecord`, `ProcessedAttestation`, `Bitfield`
//! - **Validators**: `Validator`, `ValidatorSet`, `Committee`
//! - **State**: `BeaconState`, `FlattenedState`, `Crosslink`
//! - **Keys**: `PublicKey`, `Signature` (opaque aggregable byte strings)

mod attestation;
mod bitfield;
mod block;
mod committee;
mod crosslink;
mod keys;
mod proposal;
mod state;
mod validator;

pub use attestation::{AttestationData, AttestationRecord, ProcessedAttestation};
pub use bitfield::Bitfield;
pub use block::Block;
pub use committee::{Committee, CommitteeTable};
pub use crosslink::Crosslink;
pub use keys::{PublicKey, Signature};
pub use proposal::ProposalSignedData;
pub use state::{BeaconState, FlattenedState};
pub use validator::{Validator, ValidatorSet};

/// A 32-byte BLAKE2b-256 digest.
pub type Hash = [u8; 32];

/// A 20-byte withdrawal address.
pub type Address = [u8; 20];

/// Atomic unit of block-proposal time.
pub type Slot = u64;

/// Shard identifier. The beacon chain itself uses a reserved id.
pub type ShardId = u16;

/// Position of a validator inside its `ValidatorSet`.
pub type ValidatorIndex = u32;
