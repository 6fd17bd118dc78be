//! The payload a proposer signs.

use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use serde::{Deserialize, Serialize};

use super::{Hash, ShardId, Slot};
use crate::codec::{self, append_bytes, decode_fixed, expect_list};

/// `(slot, shard, block hash without signature)`; the proposer signs its hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalSignedData {
    pub slot: Slot,
    pub shard_id: ShardId,
    pub block_hash: Hash,
}

impl ProposalSignedData {
    pub fn new(slot: Slot, shard_id: ShardId, block_hash: Hash) -> Self {
        Self {
            slot,
            shard_id,
            block_hash,
        }
    }

    /// Signing message.
    pub fn hash(&self) -> Hash {
        codec::canonical_hash(self)
    }
}

impl Encodable for ProposalSignedData {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(3);
        s.append(&self.slot);
        s.append(&self.shard_id);
        append_bytes(s, &self.block_hash);
    }
}

impl Decodable for ProposalSignedData {
    fn decode(rlp: &Rlp<'_>) -> Result<Self, DecoderError> {
        expect_list(rlp, 3)?;
        Ok(Self {
            slot: rlp.val_at(0)?,
            shard_id: rlp.val_at(1)?,
            block_hash: decode_fixed(rlp, 2)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_depends_on_every_field() {
        let base = ProposalSignedData::new(5, u16::MAX, [1; 32]);
        assert_ne!(base.hash(), ProposalSignedData::new(6, u16::MAX, [1; 32]).hash());
        assert_ne!(base.hash(), ProposalSignedData::new(5, 0, [1; 32]).hash());
        assert_ne!(base.hash(), ProposalSignedData::new(5, u16::MAX, [2; 32]).hash());
    }

    #[test]
    fn test_roundtrip() {
        let data = ProposalSignedData::new(9, 65535, [3; 32]);
        let decoded: ProposalSignedData = codec::decode(&codec::encode(&data)).unwrap();
        assert_eq!(decoded, data);
    }
}
