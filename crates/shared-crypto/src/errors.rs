//! Crypto error types.

use thiserror::Error;

/// Signature scheme errors.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Public key bytes do not decode to a valid group element
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Secret key bytes are out of range
    #[error("Invalid secret key")]
    InvalidSecretKey,

    /// Signature bytes do not decode to a valid group element
    #[error("Invalid signature")]
    InvalidSignature,

    /// Key derivation rejected the input keying material
    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    /// BLS aggregation failed
    #[error("BLS aggregation failed")]
    AggregationFailed,

    /// Invalid input for cryptographic operation
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
