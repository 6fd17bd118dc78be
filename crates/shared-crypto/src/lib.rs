//! # Shared Crypto - Signature Provider
//!
//! The beacon core treats keys and signatures as opaque bytes. This crate
//! supplies the scheme that gives them meaning.
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `provider` | - | `SignatureProvider` port, `SecretKey` |
//! | `bls` | BLS12-381 (min-pk) | Proposer and aggregate attestation signatures |
//!
//! Public keys are 48-byte compressed G1 points, signatures 96-byte
//! compressed G2 points.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod bls;
pub mod errors;
pub mod provider;

// Re-exports
pub use bls::{BlsKeyPair, BlsSignatureProvider};
pub use errors::CryptoError;
pub use provider::{SecretKey, SignatureProvider};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
