//! # RANDAO Hash Chain
//!
//! A validator commits to the top of a hash chain built from a secret seed.
//! Revealing for a block `n` slots after its parent means handing out the
//! preimage `n` levels below the commitment, so that hashing it `n` times
//! lands back on the commitment.

use shared_types::{hash_chain, Hash};

use crate::error::{DutyError, DutyResult};

#[derive(Clone, Debug)]
pub struct RandaoChain {
    seed: Hash,
    depth: u64,
}

impl RandaoChain {
    pub fn new(seed: Hash, depth: u64) -> Self {
        Self { seed, depth }
    }

    pub fn depth(&self) -> u64 {
        self.depth
    }

    /// The value registered as the validator's RANDAO commitment.
    pub fn commitment(&self) -> Hash {
        hash_chain(&self.seed, self.depth)
    }

    /// Preimage `skips` levels below the commitment.
    pub fn reveal(&self, skips: u64) -> DutyResult<Hash> {
        let level = self
            .depth
            .checked_sub(skips)
            .ok_or(DutyError::RandaoExhausted {
                skips,
                depth: self.depth,
            })?;
        Ok(hash_chain(&self.seed, level))
    }
}
