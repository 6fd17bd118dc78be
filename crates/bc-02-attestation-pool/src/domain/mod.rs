//! Domain module for the Attestation Pool

pub mod pool;

pub use pool::{AttestationPool, PoolStatus};
