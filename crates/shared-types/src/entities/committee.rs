//! Committees: validators jointly attesting one shard in one slot.

use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use serde::{Deserialize, Serialize};

use super::{ShardId, ValidatorIndex};
use crate::codec::{append_list, decode_list, expect_list};

/// Shard id plus the ordered validator indices assigned to it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Committee {
    pub shard_id: ShardId,
    pub validators: Vec<ValidatorIndex>,
}

/// Committees per slot offset within a cycle: `table[slot_offset][i]`.
pub type CommitteeTable = Vec<Vec<Committee>>;

impl Committee {
    pub fn new(shard_id: ShardId, validators: Vec<ValidatorIndex>) -> Self {
        Self {
            shard_id,
            validators,
        }
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Position of `validator` inside the committee, i.e. its bitfield index.
    pub fn position_of(&self, validator: ValidatorIndex) -> Option<usize> {
        self.validators.iter().position(|v| *v == validator)
    }
}

impl Encodable for Committee {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(2);
        s.append(&self.shard_id);
        append_list(s, &self.validators);
    }
}

impl Decodable for Committee {
    fn decode(rlp: &Rlp<'_>) -> Result<Self, DecoderError> {
        expect_list(rlp, 2)?;
        Ok(Self {
            shard_id: rlp.val_at(0)?,
            validators: decode_list(rlp, 1)?,
        })
    }
}
