//! Beacon blocks.

use std::fmt;

use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use serde::{Deserialize, Serialize};

use super::{AttestationRecord, Hash, Signature, Slot};
use crate::codec::{self, append_bytes, append_list, decode_fixed, decode_list, expect_list};
use crate::hashing::{blake2b256, short_hex, ZERO_HASH};

/// A beacon block.
///
/// Slot 0 is the genesis sentinel: its hash is defined as [`ZERO_HASH`]
/// rather than computed from its encoding.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub parent_hash: Hash,
    /// RANDAO preimage revealed by the proposer.
    pub randao_reveal: Hash,
    /// Main (proof-of-work) chain block this block builds on.
    pub main_chain_ref: Hash,
    /// Hash of the post-state computed by the proposer.
    pub state_root: Hash,
    pub slot: Slot,
    pub attestations: Vec<AttestationRecord>,
    pub signature: Signature,
}

impl Block {
    /// Unsigned block with a zero state root.
    pub fn new(
        parent_hash: Hash,
        randao_reveal: Hash,
        main_chain_ref: Hash,
        slot: Slot,
        attestations: Vec<AttestationRecord>,
    ) -> Self {
        Self {
            parent_hash,
            randao_reveal,
            main_chain_ref,
            state_root: ZERO_HASH,
            slot,
            attestations,
            signature: Signature::empty(),
        }
    }

    pub fn genesis() -> Self {
        Self::new(ZERO_HASH, ZERO_HASH, ZERO_HASH, 0, Vec::new())
    }

    pub fn is_genesis(&self) -> bool {
        self.slot == 0
    }

    /// Block hash: zero for genesis, otherwise the hash of the signed encoding.
    pub fn hash(&self) -> Hash {
        if self.is_genesis() {
            return ZERO_HASH;
        }
        blake2b256(&self.encode_with(true))
    }

    /// Hash of the encoding with an empty signature; the proposer signs this.
    pub fn hash_without_signature(&self) -> Hash {
        blake2b256(&self.encode_with(false))
    }

    /// True if `child` names this block as its parent.
    pub fn is_parent_of(&self, child: &Block) -> bool {
        self.hash() == child.parent_hash
    }

    pub fn with_state_root(mut self, state_root: Hash) -> Self {
        self.state_root = state_root;
        self
    }

    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signature = signature;
        self
    }

    /// Canonical bytes, with or without the proposer signature.
    pub fn encode_with(&self, include_signature: bool) -> Vec<u8> {
        let mut s = RlpStream::new();
        self.append_fields(&mut s, include_signature);
        s.out().to_vec()
    }

    fn append_fields(&self, s: &mut RlpStream, include_signature: bool) {
        s.begin_list(7);
        append_bytes(s, &self.parent_hash);
        append_bytes(s, &self.randao_reveal);
        append_bytes(s, &self.main_chain_ref);
        append_bytes(s, &self.state_root);
        s.append(&self.slot);
        append_list(s, &self.attestations);
        if include_signature {
            s.append(&self.signature);
        } else {
            s.append(&Signature::empty());
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> crate::errors::CodecResult<Self> {
        codec::decode(bytes)
    }
}

impl Encodable for Block {
    fn rlp_append(&self, s: &mut RlpStream) {
        self.append_fields(s, true);
    }
}

impl Decodable for Block {
    fn decode(rlp: &Rlp<'_>) -> Result<Self, DecoderError> {
        expect_list(rlp, 7)?;
        Ok(Self {
            parent_hash: decode_fixed(rlp, 0)?,
            randao_reveal: decode_fixed(rlp, 1)?,
            main_chain_ref: decode_fixed(rlp, 2)?,
            state_root: decode_fixed(rlp, 3)?,
            slot: rlp.val_at(4)?,
            attestations: decode_list(rlp, 5)?,
            signature: rlp.val_at(6)?,
        })
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("slot", &self.slot)
            .field("hash", &hex::encode(self.hash()))
            .field("parent_hash", &hex::encode(self.parent_hash))
            .field("attestations", &self.attestations.len())
            .finish()
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_genesis() {
            return write!(f, "#0 (genesis)");
        }
        write!(
            f,
            "#{} ({} <~ {}; main chain ref: {})",
            self.slot,
            short_hex(&self.hash()),
            short_hex(&self.parent_hash),
            short_hex(&self.main_chain_ref)
        )
    }
}
