//! # Storage Ports
//!
//! The consensus core reads blocks and states through these traits and never
//! touches a database directly. Implementations are synchronous; any blocking
//! or caching behaviour is theirs.
//!
//! The in-memory adapters keep canonical encodings rather than live objects,
//! so every write and read goes through the codec exactly as a persistent
//! store would.

use std::collections::{BTreeMap, HashMap};

use parking_lot::RwLock;
use tracing::debug;

use crate::entities::{BeaconState, Block, FlattenedState, Hash, Slot, ValidatorSet};
use crate::errors::{StorageError, StorageResult};
use crate::hashing::short_hex;

/// Block lookup.
pub trait BlockStore: Send + Sync {
    fn get_by_hash(&self, hash: &Hash) -> StorageResult<Option<Block>>;

    /// Block on the canonical chain at `slot`.
    fn get_canonical_by_number(&self, slot: Slot) -> StorageResult<Option<Block>>;

    /// Persist `block` with the hash of the state it produced.
    fn save(&self, block: &Block, post_state_hash: Hash, canonical: bool);

    /// Hash of the state produced by the block `block_hash`.
    fn post_state_hash(&self, block_hash: &Hash) -> Option<Hash>;
}

/// Content-addressed state storage.
pub trait StateRepository: Send + Sync {
    /// State whose hash is `state_hash`.
    fn get(&self, state_hash: &Hash) -> StorageResult<Option<BeaconState>>;

    /// Stage `state`; returns its hash. Visible to `get` immediately.
    fn insert(&self, state: &BeaconState) -> Hash;

    /// Flush staged states to the backing store.
    fn commit(&self);
}

// =============================================================================
// IN-MEMORY BLOCK STORE
// =============================================================================

#[derive(Default)]
struct BlockIndex {
    blocks: HashMap<Hash, (Vec<u8>, Hash)>,
    canonical: BTreeMap<Slot, Hash>,
}

/// Block store holding encoded blocks in memory.
#[derive(Default)]
pub struct InMemoryBlockStore {
    index: RwLock<BlockIndex>,
}

impl InMemoryBlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.index.read().blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Highest canonical block.
    pub fn canonical_head(&self) -> StorageResult<Option<Block>> {
        let head = self.index.read().canonical.values().next_back().copied();
        match head {
            Some(hash) => self.get_by_hash(&hash),
            None => Ok(None),
        }
    }
}

fn decode_block(hash: &Hash, bytes: &[u8]) -> StorageResult<Block> {
    Block::from_bytes(bytes).map_err(|source| StorageError::Corrupted {
        key: hex::encode(hash),
        source,
    })
}

impl BlockStore for InMemoryBlockStore {
    fn get_by_hash(&self, hash: &Hash) -> StorageResult<Option<Block>> {
        let index = self.index.read();
        index
            .blocks
            .get(hash)
            .map(|(bytes, _)| decode_block(hash, bytes))
            .transpose()
    }

    fn get_canonical_by_number(&self, slot: Slot) -> StorageResult<Option<Block>> {
        let hash = self.index.read().canonical.get(&slot).copied();
        match hash {
            Some(hash) => self.get_by_hash(&hash),
            None => Ok(None),
        }
    }

    fn save(&self, block: &Block, post_state_hash: Hash, canonical: bool) {
        let hash = block.hash();
        let mut index = self.index.write();
        index
            .blocks
            .insert(hash, (crate::codec::encode(block), post_state_hash));
        if canonical {
            index.canonical.insert(block.slot, hash);
        }
        debug!(
            slot = block.slot,
            hash = %short_hex(&hash),
            canonical,
            "Block saved"
        );
    }

    fn post_state_hash(&self, block_hash: &Hash) -> Option<Hash> {
        self.index
            .read()
            .blocks
            .get(block_hash)
            .map(|(_, state_hash)| *state_hash)
    }
}

// =============================================================================
// IN-MEMORY STATE REPOSITORY
// =============================================================================

#[derive(Default)]
struct StateTables {
    states: HashMap<Hash, Vec<u8>>,
    validator_sets: HashMap<Hash, Vec<u8>>,
}

/// State repository persisting flattened states and validator sets
/// separately, keyed by content hash.
#[derive(Default)]
pub struct InMemoryStateRepository {
    staged: RwLock<StateTables>,
    committed: RwLock<StateTables>,
}

impl InMemoryStateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed states.
    pub fn committed_len(&self) -> usize {
        self.committed.read().states.len()
    }

    fn lookup_state(&self, hash: &Hash) -> Option<Vec<u8>> {
        if let Some(bytes) = self.staged.read().states.get(hash) {
            return Some(bytes.clone());
        }
        self.committed.read().states.get(hash).cloned()
    }

    fn lookup_validator_set(&self, hash: &Hash) -> Option<Vec<u8>> {
        if let Some(bytes) = self.staged.read().validator_sets.get(hash) {
            return Some(bytes.clone());
        }
        self.committed.read().validator_sets.get(hash).cloned()
    }
}

impl StateRepository for InMemoryStateRepository {
    fn get(&self, state_hash: &Hash) -> StorageResult<Option<BeaconState>> {
        let Some(bytes) = self.lookup_state(state_hash) else {
            return Ok(None);
        };
        let flattened =
            FlattenedState::from_bytes(&bytes).map_err(|source| StorageError::Corrupted {
                key: hex::encode(state_hash),
                source,
            })?;

        let set_hash = flattened.validator_set_hash;
        let set_bytes = self
            .lookup_validator_set(&set_hash)
            .ok_or(StorageError::MissingValidatorSet(set_hash))?;
        let validator_set =
            ValidatorSet::from_bytes(&set_bytes).map_err(|source| StorageError::Corrupted {
                key: hex::encode(set_hash),
                source,
            })?;

        Ok(Some(BeaconState::from_flattened(flattened, validator_set)))
    }

    fn insert(&self, state: &BeaconState) -> Hash {
        let flattened = state.flatten();
        let hash = flattened.hash();
        let set_hash = flattened.validator_set_hash;
        let known_set = self.lookup_validator_set(&set_hash).is_some();

        let mut staged = self.staged.write();
        if !known_set {
            staged
                .validator_sets
                .insert(set_hash, state.validator_set.to_bytes());
        }
        staged.states.insert(hash, flattened.to_bytes());
        hash
    }

    fn commit(&self) {
        let staged = std::mem::take(&mut *self.staged.write());
        let flushed = staged.states.len();
        let mut committed = self.committed.write();
        committed.states.extend(staged.states);
        committed.validator_sets.extend(staged.validator_sets);
        debug!(states = flushed, "State repository committed");
    }
}
