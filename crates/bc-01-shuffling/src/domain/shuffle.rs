//! # Seeded Shuffle
//!
//! Fisher-Yates driven by a BLAKE2b-256 hash stream. The permutation itself is
//! not part of the consensus contract beyond determinism, but every node in
//! a network must run the same one.

use shared_types::{blake2b256, Hash};

/// Next hash-stream state: `blake2b256(state || round_le)`.
fn next_state(state: &Hash, round: u64) -> Hash {
    let mut input = [0u8; 40];
    input[..32].copy_from_slice(state);
    input[32..].copy_from_slice(&round.to_le_bytes());
    blake2b256(&input)
}

/// Shuffle a list of items using `seed` (Fisher-Yates).
pub fn shuffle_with_seed<T: Clone>(items: &[T], seed: &Hash) -> Vec<T> {
    let mut result = items.to_vec();
    let len = result.len();

    if len <= 1 {
        return result;
    }

    let mut rng_state = *seed;

    for i in (1..len).rev() {
        rng_state = next_state(&rng_state, i as u64);
        let mut word = [0u8; 8];
        word.copy_from_slice(&rng_state[..8]);
        let j = (u64::from_le_bytes(word) % (i as u64 + 1)) as usize;
        result.swap(i, j);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shuffle_deterministic() {
        let items: Vec<u32> = (0..50).collect();
        let seed = [0xAB; 32];

        assert_eq!(shuffle_with_seed(&items, &seed), shuffle_with_seed(&items, &seed));
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let items: Vec<u32> = (0..257).collect();
        let mut shuffled = shuffle_with_seed(&items, &[0x42; 32]);
        assert_ne!(shuffled, items);

        shuffled.sort_unstable();
        assert_eq!(shuffled, items);
    }

    #[test]
    fn test_shuffle_different_seeds() {
        let items: Vec<u32> = (0..20).collect();

        let result1 = shuffle_with_seed(&items, &[0xAA; 32]);
        let result2 = shuffle_with_seed(&items, &[0xBB; 32]);

        assert_ne!(result1, result2);
    }

    #[test]
    fn test_shuffle_trivial_inputs() {
        let empty: Vec<u32> = Vec::new();
        assert!(shuffle_with_seed(&empty, &[1; 32]).is_empty());
        assert_eq!(shuffle_with_seed(&[9u32], &[1; 32]), vec![9]);
    }
}
