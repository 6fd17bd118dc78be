//! The signature port used by validation, pooling and the duty actors.

use shared_types::{PublicKey, Signature};
use zeroize::Zeroize;

use crate::CryptoError;

/// Raw 32-byte signing key. Wiped on drop.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SecretKey([u8; 32]);

impl SecretKey {
    /// Wrap raw key bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

/// Aggregatable signature scheme.
///
/// Implementations must be deterministic: signing the same message with the
/// same key yields the same bytes, and aggregation is order-independent.
pub trait SignatureProvider: Send + Sync {
    /// Sign `message` with `key`.
    fn sign(&self, message: &[u8], key: &SecretKey) -> Result<Signature, CryptoError>;

    /// Check `signature` over `message` against `public_key`.
    ///
    /// Malformed inputs verify as `false` rather than erroring.
    fn verify(&self, signature: &Signature, message: &[u8], public_key: &PublicKey) -> bool;

    /// Combine signatures over the same message.
    fn aggregate_signatures(&self, signatures: &[Signature]) -> Result<Signature, CryptoError>;

    /// Combine public keys so the result verifies an aggregate signature.
    fn aggregate_public_keys(&self, keys: &[PublicKey]) -> Result<PublicKey, CryptoError>;

    /// Derive the public key for `key`.
    fn private_to_public(&self, key: &SecretKey) -> Result<PublicKey, CryptoError>;
}
