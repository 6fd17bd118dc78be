//! Per-shard crosslink records.

use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use serde::{Deserialize, Serialize};

use super::{Hash, Slot};
use crate::codec::{append_bytes, decode_fixed, expect_list};
use crate::hashing::ZERO_HASH;

/// The beacon chain's record of a shard's latest attested block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crosslink {
    /// Slot at which the crosslink was recorded.
    pub slot: Slot,
    /// Shard block hash.
    pub hash: Hash,
}

impl Crosslink {
    pub fn new(slot: Slot, hash: Hash) -> Self {
        Self { slot, hash }
    }

    /// Crosslink of a shard that has never been crosslinked.
    pub fn empty() -> Self {
        Self::new(0, ZERO_HASH)
    }
}

impl Encodable for Crosslink {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(2);
        s.append(&self.slot);
        append_bytes(s, &self.hash);
    }
}

impl Decodable for Crosslink {
    fn decode(rlp: &Rlp<'_>) -> Result<Self, DecoderError> {
        expect_list(rlp, 2)?;
        Ok(Self {
            slot: rlp.val_at(0)?,
            hash: decode_fixed(rlp, 1)?,
        })
    }
}
