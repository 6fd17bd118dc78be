//! Attestations: signed votes for a block and a shard state.
//!
//! `AttestationData` is the vote content and is identified by its hash (the
//! "fingerprint"). An `AttestationRecord` adds who voted and the aggregate
//! signature; it is what blocks carry. Once included, a record is kept in
//! state as a `ProcessedAttestation` tagged with its inclusion slot.

use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use serde::{Deserialize, Serialize};

use super::{Bitfield, Hash, ShardId, Signature, Slot};
use crate::codec::{self, append_bytes, decode_fixed, expect_list};

/// The signed vote content. Immutable; hashed for identity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationData {
    pub slot: Slot,
    pub shard_id: ShardId,
    /// Block being voted for.
    pub block_hash: Hash,
    /// Ancestor of `block_hash` at the start of its cycle.
    pub cycle_boundary_hash: Hash,
    /// Shard block being voted for. Zero until shard chains exist.
    pub shard_block_hash: Hash,
    pub last_crosslink_hash: Hash,
    pub justified_slot: Slot,
    pub justified_block_hash: Hash,
}

impl AttestationData {
    /// Fingerprint of the vote; also the signing message.
    pub fn hash(&self) -> Hash {
        codec::canonical_hash(self)
    }
}

impl Encodable for AttestationData {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(8);
        s.append(&self.slot);
        s.append(&self.shard_id);
        append_bytes(s, &self.block_hash);
        append_bytes(s, &self.cycle_boundary_hash);
        append_bytes(s, &self.shard_block_hash);
        append_bytes(s, &self.last_crosslink_hash);
        s.append(&self.justified_slot);
        append_bytes(s, &self.justified_block_hash);
    }
}

impl Decodable for AttestationData {
    fn decode(rlp: &Rlp<'_>) -> Result<Self, DecoderError> {
        expect_list(rlp, 8)?;
        Ok(Self {
            slot: rlp.val_at(0)?,
            shard_id: rlp.val_at(1)?,
            block_hash: decode_fixed(rlp, 2)?,
            cycle_boundary_hash: decode_fixed(rlp, 3)?,
            shard_block_hash: decode_fixed(rlp, 4)?,
            last_crosslink_hash: decode_fixed(rlp, 5)?,
            justified_slot: rlp.val_at(6)?,
            justified_block_hash: decode_fixed(rlp, 7)?,
        })
    }
}

/// Vote content plus participation and aggregate signature.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationRecord {
    pub data: AttestationData,
    /// Which committee members signed.
    pub attester_bitfield: Bitfield,
    /// Proof-of-custody bits.
    pub poc_bitfield: Bitfield,
    pub aggregate_signature: Signature,
}

impl AttestationRecord {
    pub fn new(
        data: AttestationData,
        attester_bitfield: Bitfield,
        poc_bitfield: Bitfield,
        aggregate_signature: Signature,
    ) -> Self {
        Self {
            data,
            attester_bitfield,
            poc_bitfield,
            aggregate_signature,
        }
    }

    /// Identity of the whole record, signature included.
    pub fn hash(&self) -> Hash {
        codec::canonical_hash(self)
    }

    pub fn slot(&self) -> Slot {
        self.data.slot
    }

    pub fn shard_id(&self) -> ShardId {
        self.data.shard_id
    }
}

impl Encodable for AttestationRecord {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(4);
        s.append(&self.data);
        s.append(&self.attester_bitfield);
        s.append(&self.poc_bitfield);
        s.append(&self.aggregate_signature);
    }
}

impl Decodable for AttestationRecord {
    fn decode(rlp: &Rlp<'_>) -> Result<Self, DecoderError> {
        expect_list(rlp, 4)?;
        Ok(Self {
            data: rlp.val_at(0)?,
            attester_bitfield: rlp.val_at(1)?,
            poc_bitfield: rlp.val_at(2)?,
            aggregate_signature: rlp.val_at(3)?,
        })
    }
}

/// An included attestation retained in state until it ages out.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedAttestation {
    pub data: AttestationData,
    pub attester_bitfield: Bitfield,
    pub poc_bitfield: Bitfield,
    /// Slot of the block that included the record.
    pub slot_included: Slot,
}

impl ProcessedAttestation {
    pub fn new(record: &AttestationRecord, slot_included: Slot) -> Self {
        Self {
            data: record.data.clone(),
            attester_bitfield: record.attester_bitfield.clone(),
            poc_bitfield: record.poc_bitfield.clone(),
            slot_included,
        }
    }

    pub fn slot(&self) -> Slot {
        self.data.slot
    }
}

impl Encodable for ProcessedAttestation {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(4);
        s.append(&self.data);
        s.append(&self.attester_bitfield);
        s.append(&self.poc_bitfield);
        s.append(&self.slot_included);
    }
}

impl Decodable for ProcessedAttestation {
    fn decode(rlp: &Rlp<'_>) -> Result<Self, DecoderError> {
        expect_list(rlp, 4)?;
        Ok(Self {
            data: rlp.val_at(0)?,
            attester_bitfield: rlp.val_at(1)?,
            poc_bitfield: rlp.val_at(2)?,
            slot_included: rlp.val_at(3)?,
        })
    }
}
