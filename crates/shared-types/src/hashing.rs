//! # Hashing
//!
//! BLAKE2b with a 256-bit output is the single digest used across the core:
//! canonical entity hashes, signed-data roots, shuffling streams and RANDAO
//! hash chains.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

use crate::entities::Hash;

/// The all-zero 32-byte hash. Doubles as the genesis block hash.
pub const ZERO_HASH: Hash = [0u8; 32];

type Blake2b256 = Blake2b<U32>;

/// BLAKE2b-256 of `data`.
pub fn blake2b256(data: &[u8]) -> Hash {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash `seed` `times` times in a row.
///
/// `hash_chain(x, 0) == x`. RANDAO reveals are checked by hashing the
/// revealed preimage forward until it meets the stored commitment.
pub fn hash_chain(seed: &Hash, times: u64) -> Hash {
    let mut current = *seed;
    for _ in 0..times {
        current = blake2b256(&current);
    }
    current
}

/// Short hex prefix used in log lines and `Display` impls.
pub fn short_hex(bytes: &[u8]) -> String {
    let take = bytes.len().min(3);
    hex::encode(&bytes[..take])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blake2b256_known_vectors() {
        assert_eq!(
            hex::encode(blake2b256(&[])),
            "0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8"
        );
        assert_ne!(blake2b256(b"abc"), blake2b256(b"abd"));
    }

    #[test]
    fn test_hash_chain_zero_times_is_identity() {
        let seed = [7u8; 32];
        assert_eq!(hash_chain(&seed, 0), seed);
    }

    #[test]
    fn test_hash_chain_composes() {
        let seed = [1u8; 32];
        let two = hash_chain(&seed, 2);
        assert_eq!(hash_chain(&hash_chain(&seed, 1), 1), two);
        assert_eq!(hash_chain(&seed, 5), hash_chain(&two, 3));
    }

    #[test]
    fn test_short_hex() {
        assert_eq!(short_hex(&[0xab, 0xcd, 0xef, 0x01]), "abcdef");
        assert_eq!(short_hex(&[0x01]), "01");
    }
}
