//! Domain module for Validator Duties
//!
//! - randao: the local RANDAO hash chain
//! - attester: single-vote attestations for the head block
//! - proposer: signed block proposals

pub mod attester;
pub mod proposer;
pub mod randao;

#[cfg(test)]
pub(crate) mod testing;

pub use attester::Attester;
pub use proposer::Proposer;
pub use randao::RandaoChain;
