//! Validators and the content-addressed validator set.
//!
//! A `ValidatorSet` is an immutable value shared behind an `Arc`; cloning it
//! is cheap and registration returns a new set (copy-on-write). Its hash is
//! computed once at construction, which is what lets `FlattenedState` refer
//! to a set by hash without re-encoding it.

use std::collections::HashMap;
use std::sync::Arc;

use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use serde::{Deserialize, Serialize};

use super::{Address, Hash, PublicKey, ShardId, ValidatorIndex};
use crate::codec::{self, append_bytes, append_list, decode_fixed, decode_list, expect_list};

/// A staking participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    pub pubkey: PublicKey,
    /// Shard the validator withdraws to.
    pub withdrawal_shard: ShardId,
    pub withdrawal_address: Address,
    /// Head of the validator's RANDAO hash chain.
    pub randao_commitment: Hash,
}

impl Encodable for Validator {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(4);
        s.append(&self.pubkey);
        s.append(&self.withdrawal_shard);
        append_bytes(s, &self.withdrawal_address);
        append_bytes(s, &self.randao_commitment);
    }
}

impl Decodable for Validator {
    fn decode(rlp: &Rlp<'_>) -> Result<Self, DecoderError> {
        expect_list(rlp, 4)?;
        Ok(Self {
            pubkey: rlp.val_at(0)?,
            withdrawal_shard: rlp.val_at(1)?,
            withdrawal_address: decode_fixed(rlp, 2)?,
            randao_commitment: decode_fixed(rlp, 3)?,
        })
    }
}

/// Ordered, content-addressed collection of validators.
#[derive(Clone)]
pub struct ValidatorSet {
    validators: Arc<Vec<Validator>>,
    by_pubkey: Arc<HashMap<PublicKey, ValidatorIndex>>,
    hash: Hash,
}

impl ValidatorSet {
    pub fn new(validators: Vec<Validator>) -> Self {
        let by_pubkey = validators
            .iter()
            .enumerate()
            .map(|(i, v)| (v.pubkey.clone(), i as ValidatorIndex))
            .collect();
        let hash = Self::compute_hash(&validators);
        Self {
            validators: Arc::new(validators),
            by_pubkey: Arc::new(by_pubkey),
            hash,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    fn compute_hash(validators: &[Validator]) -> Hash {
        crate::hashing::blake2b256(&encode_validators(validators))
    }

    /// Content hash of the set.
    pub fn hash(&self) -> Hash {
        self.hash
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    pub fn get(&self, index: ValidatorIndex) -> Option<&Validator> {
        self.validators.get(index as usize)
    }

    /// Index and record of the validator owning `pubkey`.
    pub fn get_by_pubkey(&self, pubkey: &PublicKey) -> Option<(ValidatorIndex, &Validator)> {
        let index = *self.by_pubkey.get(pubkey)?;
        self.get(index).map(|v| (index, v))
    }

    /// Indices eligible for committee assignment. Every registered
    /// validator is active; there is no exit or activation queue.
    pub fn active_indices(&self) -> Vec<ValidatorIndex> {
        (0..self.validators.len() as ValidatorIndex).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Validator> {
        self.validators.iter()
    }

    /// New set with `added` appended. Validators whose pubkey is already
    /// registered are skipped.
    pub fn with_registered(&self, added: impl IntoIterator<Item = Validator>) -> Self {
        let mut validators = self.validators.as_ref().clone();
        let mut seen: std::collections::HashSet<PublicKey> =
            self.by_pubkey.keys().cloned().collect();
        for validator in added {
            if seen.insert(validator.pubkey.clone()) {
                validators.push(validator);
            }
        }
        Self::new(validators)
    }

    /// Canonical bytes of the set, used by validator-set stores.
    pub fn to_bytes(&self) -> Vec<u8> {
        encode_validators(&self.validators)
    }

    pub fn from_bytes(bytes: &[u8]) -> crate::errors::CodecResult<Self> {
        let wrapper: ValidatorList = codec::decode(bytes)?;
        Ok(Self::new(wrapper.0))
    }
}

fn encode_validators(validators: &[Validator]) -> Vec<u8> {
    let mut s = RlpStream::new_list(1);
    append_list(&mut s, validators);
    s.out().to_vec()
}

struct ValidatorList(Vec<Validator>);

impl Decodable for ValidatorList {
    fn decode(rlp: &Rlp<'_>) -> Result<Self, DecoderError> {
        expect_list(rlp, 1)?;
        Ok(Self(decode_list(rlp, 0)?))
    }
}

impl PartialEq for ValidatorSet {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for ValidatorSet {}

impl std::fmt::Debug for ValidatorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorSet")
            .field("len", &self.validators.len())
            .field("hash", &hex::encode(self.hash))
            .finish()
    }
}

impl Default for ValidatorSet {
    fn default() -> Self {
        Self::empty()
    }
}
