//! BLS12-381 Signature Implementation
//!
//! Provides the production [`SignatureProvider`]:
//! - Key generation (random or from input keying material)
//! - Sign/verify operations
//! - Signature and public key aggregation
//!
//! Used by block validation for proposer and attestation signatures and by
//! the attestation pool for aggregation.

use blst::min_pk::{
    AggregatePublicKey, AggregateSignature, PublicKey as BlstPublicKey,
    SecretKey as BlstSecretKey, Signature as BlstSignature,
};
use blst::BLST_ERROR;
use rand::RngCore;
use shared_types::{PublicKey, Signature};
use tracing::trace;

use crate::{CryptoError, SecretKey, SignatureProvider};

/// Domain separation tag for BLS signatures (proof-of-possession scheme)
const DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

/// Compressed public key length in bytes.
pub const PUBLIC_KEY_LEN: usize = 48;

/// Compressed signature length in bytes.
pub const SIGNATURE_LEN: usize = 96;

/// Stateless BLS provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlsSignatureProvider;

impl BlsSignatureProvider {
    /// Create a provider.
    pub fn new() -> Self {
        Self
    }
}

fn secret(key: &SecretKey) -> Result<BlstSecretKey, CryptoError> {
    BlstSecretKey::from_bytes(key.as_bytes()).map_err(|_| CryptoError::InvalidSecretKey)
}

fn public(key: &PublicKey) -> Result<BlstPublicKey, CryptoError> {
    if key.as_bytes().len() != PUBLIC_KEY_LEN {
        return Err(CryptoError::InvalidPublicKey);
    }
    BlstPublicKey::from_bytes(key.as_bytes()).map_err(|_| CryptoError::InvalidPublicKey)
}

fn signature(sig: &Signature) -> Result<BlstSignature, CryptoError> {
    if sig.as_bytes().len() != SIGNATURE_LEN {
        return Err(CryptoError::InvalidSignature);
    }
    BlstSignature::from_bytes(sig.as_bytes()).map_err(|_| CryptoError::InvalidSignature)
}

impl SignatureProvider for BlsSignatureProvider {
    fn sign(&self, message: &[u8], key: &SecretKey) -> Result<Signature, CryptoError> {
        let sk = secret(key)?;
        Ok(Signature(sk.sign(message, DST, &[]).to_bytes().to_vec()))
    }

    fn verify(&self, sig: &Signature, message: &[u8], public_key: &PublicKey) -> bool {
        let (Ok(sig), Ok(pk)) = (signature(sig), public(public_key)) else {
            trace!("[shared-crypto] malformed signature or key, rejecting");
            return false;
        };
        sig.verify(true, message, DST, &[], &pk, true) == BLST_ERROR::BLST_SUCCESS
    }

    fn aggregate_signatures(&self, signatures: &[Signature]) -> Result<Signature, CryptoError> {
        if signatures.is_empty() {
            return Err(CryptoError::InvalidInput("empty signature list".into()));
        }
        let parsed = signatures
            .iter()
            .map(signature)
            .collect::<Result<Vec<_>, _>>()?;
        let refs: Vec<&BlstSignature> = parsed.iter().collect();
        AggregateSignature::aggregate(&refs, true)
            .map(|agg| Signature(agg.to_signature().to_bytes().to_vec()))
            .map_err(|_| CryptoError::AggregationFailed)
    }

    fn aggregate_public_keys(&self, keys: &[PublicKey]) -> Result<PublicKey, CryptoError> {
        if keys.is_empty() {
            return Err(CryptoError::InvalidInput("empty key list".into()));
        }
        let parsed = keys.iter().map(public).collect::<Result<Vec<_>, _>>()?;
        let refs: Vec<&BlstPublicKey> = parsed.iter().collect();
        AggregatePublicKey::aggregate(&refs, true)
            .map(|agg| PublicKey(agg.to_public_key().to_bytes().to_vec()))
            .map_err(|_| CryptoError::AggregationFailed)
    }

    fn private_to_public(&self, key: &SecretKey) -> Result<PublicKey, CryptoError> {
        Ok(PublicKey(secret(key)?.sk_to_pk().to_bytes().to_vec()))
    }
}

/// BLS key pair for signing operations
pub struct BlsKeyPair {
    secret: SecretKey,
    public: PublicKey,
}

impl BlsKeyPair {
    /// Generate a new random key pair
    pub fn generate() -> Result<Self, CryptoError> {
        let mut ikm = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut ikm);
        Self::from_ikm(&ikm)
    }

    /// Derive a key pair from input keying material (at least 32 bytes).
    ///
    /// Deterministic; handy for fixtures and devnets.
    pub fn from_ikm(ikm: &[u8]) -> Result<Self, CryptoError> {
        let sk = BlstSecretKey::key_gen(ikm, &[])
            .map_err(|e| CryptoError::KeyGenerationFailed(format!("{e:?}")))?;
        let public = PublicKey(sk.sk_to_pk().to_bytes().to_vec());
        Ok(Self {
            secret: SecretKey::from_bytes(sk.to_bytes()),
            public,
        })
    }

    /// Derive a key pair from a small integer seed.
    pub fn from_seed(seed: u64) -> Result<Self, CryptoError> {
        let mut ikm = [0u8; 32];
        ikm[..8].copy_from_slice(&seed.to_be_bytes());
        Self::from_ikm(&shared_types::blake2b256(&ikm))
    }

    /// Create from existing secret key bytes
    pub fn from_secret(secret: SecretKey) -> Result<Self, CryptoError> {
        let public = BlsSignatureProvider.private_to_public(&secret)?;
        Ok(Self { secret, public })
    }

    /// The signing key.
    pub fn secret(&self) -> &SecretKey {
        &self.secret
    }

    /// The compressed public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }
}
