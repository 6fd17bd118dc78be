//! # Beacon State
//!
//! `BeaconState` is the single merged consensus state: validator set,
//! committee table, justification counters, crosslinks, pending
//! attestations and the recent block-hash window.
//!
//! ## Value semantics
//!
//! A state is never shared mutably. Transitions take a state by value and
//! return the successor; readers holding an older version are unaffected.
//!
//! ## Flattened form
//!
//! `FlattenedState` replaces the validator set with its content hash. Its
//! canonical encoding is what gets hashed and persisted, so hashing a state
//! never re-encodes the whole validator collection.

use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use serde::{Deserialize, Serialize};

use super::{
    Committee, CommitteeTable, Crosslink, Hash, ProcessedAttestation, ShardId, Slot, ValidatorSet,
};
use crate::codec::{
    self, append_bytes, append_hash_list, append_list, append_nested_list, decode_fixed,
    decode_hash_list, decode_list, decode_nested_list, expect_list,
};
use crate::config::ChainConfig;
use crate::hashing::ZERO_HASH;

/// Consensus state after applying a block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BeaconState {
    /// Cycle-aligned slot of the last cycle transition.
    pub last_state_recalc: Slot,
    pub validator_set: ValidatorSet,
    /// `committees[slot_offset][i]` for each slot of a cycle.
    pub committees: CommitteeTable,
    pub next_shuffling_seed: Hash,
    /// Cycle-aligned slot at which committees were last recomputed.
    pub validator_set_change_slot: Slot,
    pub last_justified_slot: Slot,
    /// Consecutive justified slots ending at `last_justified_slot`.
    pub justified_streak: u64,
    pub last_finalized_slot: Slot,
    /// Latest crosslink per shard, indexed by shard id.
    pub crosslinks: Vec<Crosslink>,
    /// Included attestations not yet aged out.
    pub pending_attestations: Vec<ProcessedAttestation>,
    /// Recent block hashes, oldest first. The last entry belongs to the
    /// slot of the block this state was produced from.
    pub recent_block_hashes: Vec<Hash>,
    pub randao_mix: Hash,
    pub genesis_time: u64,
}

impl BeaconState {
    /// The state every chain starts from before the initial transition.
    pub fn empty(config: &ChainConfig) -> Self {
        Self {
            last_state_recalc: 0,
            validator_set: ValidatorSet::empty(),
            committees: Vec::new(),
            next_shuffling_seed: ZERO_HASH,
            validator_set_change_slot: 0,
            last_justified_slot: 0,
            justified_streak: 0,
            last_finalized_slot: 0,
            crosslinks: Vec::new(),
            pending_attestations: Vec::new(),
            recent_block_hashes: vec![ZERO_HASH; config.recent_block_hashes_len()],
            randao_mix: ZERO_HASH,
            genesis_time: 0,
        }
    }

    /// Hash of the flattened encoding.
    pub fn hash(&self) -> Hash {
        self.flatten().hash()
    }

    pub fn flatten(&self) -> FlattenedState {
        FlattenedState {
            validator_set_hash: self.validator_set.hash(),
            last_state_recalc: self.last_state_recalc,
            last_justified_slot: self.last_justified_slot,
            justified_streak: self.justified_streak,
            last_finalized_slot: self.last_finalized_slot,
            validator_set_change_slot: self.validator_set_change_slot,
            next_shuffling_seed: self.next_shuffling_seed,
            committees: self.committees.clone(),
            crosslinks: self.crosslinks.clone(),
            pending_attestations: self.pending_attestations.clone(),
            recent_block_hashes: self.recent_block_hashes.clone(),
            randao_mix: self.randao_mix,
            genesis_time: self.genesis_time,
        }
    }

    /// Rebuild a state from its flattened form and the resolved validator set.
    ///
    /// The caller is responsible for `validator_set.hash()` matching
    /// `flattened.validator_set_hash`.
    pub fn from_flattened(flattened: FlattenedState, validator_set: ValidatorSet) -> Self {
        Self {
            last_state_recalc: flattened.last_state_recalc,
            validator_set,
            committees: flattened.committees,
            next_shuffling_seed: flattened.next_shuffling_seed,
            validator_set_change_slot: flattened.validator_set_change_slot,
            last_justified_slot: flattened.last_justified_slot,
            justified_streak: flattened.justified_streak,
            last_finalized_slot: flattened.last_finalized_slot,
            crosslinks: flattened.crosslinks,
            pending_attestations: flattened.pending_attestations,
            recent_block_hashes: flattened.recent_block_hashes,
            randao_mix: flattened.randao_mix,
            genesis_time: flattened.genesis_time,
        }
    }

    // -------------------------------------------------------------------------
    // Functional updates
    // -------------------------------------------------------------------------

    pub fn with_validator_set(mut self, validator_set: ValidatorSet) -> Self {
        self.validator_set = validator_set;
        self
    }

    pub fn with_committees(mut self, committees: CommitteeTable) -> Self {
        self.committees = committees;
        self
    }

    pub fn with_validator_set_change_slot(mut self, slot: Slot) -> Self {
        self.validator_set_change_slot = slot;
        self
    }

    pub fn with_last_state_recalc(mut self, slot: Slot) -> Self {
        self.last_state_recalc = slot;
        self
    }

    pub fn with_crosslinks(mut self, crosslinks: Vec<Crosslink>) -> Self {
        self.crosslinks = crosslinks;
        self
    }

    pub fn with_genesis_time(mut self, genesis_time: u64) -> Self {
        self.genesis_time = genesis_time;
        self
    }

    /// Append `hash` once per slot in `(parent_slot, slot]`.
    pub fn append_recent_block_hashes(mut self, hash: Hash, parent_slot: Slot, slot: Slot) -> Self {
        let skipped = slot.saturating_sub(parent_slot) as usize;
        self.recent_block_hashes
            .extend(std::iter::repeat(hash).take(skipped));
        self
    }

    /// Keep only the newest `len` entries of the hash window.
    pub fn trim_recent_block_hashes(mut self, len: usize) -> Self {
        let excess = self.recent_block_hashes.len().saturating_sub(len);
        self.recent_block_hashes.drain(..excess);
        self
    }

    /// Add included attestations tagged with the inclusion slot.
    pub fn add_pending_attestations<'a>(
        mut self,
        records: impl IntoIterator<Item = &'a super::AttestationRecord>,
        slot_included: Slot,
    ) -> Self {
        self.pending_attestations.extend(
            records
                .into_iter()
                .map(|record| ProcessedAttestation::new(record, slot_included)),
        );
        self
    }

    /// Drop pending attestations older than the last recalculation.
    pub fn remove_outdated_attestations(mut self) -> Self {
        let threshold = self.last_state_recalc;
        self.pending_attestations.retain(|a| a.slot() >= threshold);
        self
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Shard id of the last committee in the last slot, or 0 if none.
    pub fn committees_end_shard(&self) -> ShardId {
        self.committees
            .last()
            .and_then(|slot| slot.last())
            .map(|committee| committee.shard_id)
            .unwrap_or(0)
    }

    /// Slot an attestation made at `slot` must name as its justified slot.
    pub fn justification_source_for_slot(&self, _slot: Slot) -> Slot {
        self.last_justified_slot
    }

    /// Hash recorded in the window for `slot`, where the window ends at
    /// `head_slot` (the slot of the block that produced this state).
    /// `None` if `slot` is in the future or has left the window.
    pub fn recent_block_hash_for_slot(&self, slot: Slot, head_slot: Slot) -> Option<Hash> {
        let distance = head_slot.checked_sub(slot)? as usize;
        let last = self.recent_block_hashes.len().checked_sub(1)?;
        let index = last.checked_sub(distance)?;
        self.recent_block_hashes.get(index).copied()
    }

    /// Crosslink currently recorded for `shard_id`.
    pub fn crosslink(&self, shard_id: ShardId) -> Option<&Crosslink> {
        self.crosslinks.get(shard_id as usize)
    }

    /// Committees for the cycle position of `slot`, or `None` when `slot`
    /// predates the last committee change or the table is empty.
    pub fn committees_for_slot(&self, slot: Slot) -> Option<&[Committee]> {
        let offset = slot.checked_sub(self.validator_set_change_slot)?;
        if self.committees.is_empty() {
            return None;
        }
        let index = (offset % self.committees.len() as u64) as usize;
        self.committees.get(index).map(Vec::as_slice)
    }
}

/// `BeaconState` with the validator set replaced by its hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlattenedState {
    pub validator_set_hash: Hash,
    pub last_state_recalc: Slot,
    pub last_justified_slot: Slot,
    pub justified_streak: u64,
    pub last_finalized_slot: Slot,
    pub validator_set_change_slot: Slot,
    pub next_shuffling_seed: Hash,
    pub committees: CommitteeTable,
    pub crosslinks: Vec<Crosslink>,
    pub pending_attestations: Vec<ProcessedAttestation>,
    pub recent_block_hashes: Vec<Hash>,
    pub randao_mix: Hash,
    pub genesis_time: u64,
}

impl FlattenedState {
    pub fn hash(&self) -> Hash {
        codec::canonical_hash(self)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        codec::encode(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> crate::errors::CodecResult<Self> {
        codec::decode(bytes)
    }
}

impl Encodable for FlattenedState {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(13);
        append_bytes(s, &self.validator_set_hash);
        s.append(&self.last_state_recalc);
        s.append(&self.last_justified_slot);
        s.append(&self.justified_streak);
        s.append(&self.last_finalized_slot);
        s.append(&self.validator_set_change_slot);
        append_bytes(s, &self.next_shuffling_seed);
        append_nested_list(s, &self.committees);
        append_list(s, &self.crosslinks);
        append_list(s, &self.pending_attestations);
        append_hash_list(s, &self.recent_block_hashes);
        append_bytes(s, &self.randao_mix);
        s.append(&self.genesis_time);
    }
}

impl Decodable for FlattenedState {
    fn decode(rlp: &Rlp<'_>) -> Result<Self, DecoderError> {
        expect_list(rlp, 13)?;
        Ok(Self {
            validator_set_hash: decode_fixed(rlp, 0)?,
            last_state_recalc: rlp.val_at(1)?,
            last_justified_slot: rlp.val_at(2)?,
            justified_streak: rlp.val_at(3)?,
            last_finalized_slot: rlp.val_at(4)?,
            validator_set_change_slot: rlp.val_at(5)?,
            next_shuffling_seed: decode_fixed(rlp, 6)?,
            committees: decode_nested_list(rlp, 7)?,
            crosslinks: decode_list(rlp, 8)?,
            pending_attestations: decode_list(rlp, 9)?,
            recent_block_hashes: decode_hash_list(rlp, 10)?,
            randao_mix: decode_fixed(rlp, 11)?,
            genesis_time: rlp.val_at(12)?,
        })
    }
}
