//! Chain fixtures shared by the transition and processor tests.

use std::sync::Arc;

use bc_01_shuffling::{proposer_index, ShufflingCommitteeFactory};
use bc_03_block_validation::randao_skips;
use shared_bus::InMemoryEventBus;
use shared_crypto::{BlsKeyPair, BlsSignatureProvider, SignatureProvider};
use shared_types::storage::{
    BlockStore, InMemoryBlockStore, InMemoryStateRepository, StateRepository,
};
use shared_types::{
    hash_chain, blake2b256, AttestationData, AttestationRecord, BeaconState, Bitfield, Block,
    ChainConfig, Hash, ProposalSignedData, Signature, Slot, Validator,
    ValidatorIndex, ZERO_HASH,
};

use crate::adapters::InMemoryValidatorRegistry;
use crate::domain::{InitialTransition, StateTransition};
use crate::ports::BlockTransition;

/// Hashes between each validator's RANDAO seed and its commitment.
pub const RANDAO_DEPTH: u64 = 64;

pub fn randao_seed(index: ValidatorIndex) -> Hash {
    blake2b256(&u64::from(index).to_be_bytes())
}

pub fn validators(keys: &[BlsKeyPair], depth: u64) -> Vec<Validator> {
    keys.iter()
        .enumerate()
        .map(|(i, kp)| Validator {
            pubkey: kp.public_key().clone(),
            withdrawal_shard: 0,
            withdrawal_address: [0u8; 20],
            randao_commitment: hash_chain(&randao_seed(i as ValidatorIndex), depth),
        })
        .collect()
}

/// Attestation that only carries a slot; the transition does not check it.
pub fn attestation_at(slot: Slot) -> AttestationRecord {
    let data = AttestationData {
        slot,
        ..Default::default()
    };
    AttestationRecord::new(data, Bitfield::single(2, 0), Bitfield::with_capacity(2), Signature::empty())
}

pub struct Env {
    pub config: ChainConfig,
    pub keys: Vec<BlsKeyPair>,
    pub store: Arc<InMemoryBlockStore>,
    pub repo: Arc<InMemoryStateRepository>,
    pub bus: Arc<InMemoryEventBus>,
    pub registry: Arc<InMemoryValidatorRegistry>,
    pub factory: Arc<ShufflingCommitteeFactory>,
    pub initial: InitialTransition,
    pub transition: StateTransition,
    pub genesis_state: BeaconState,
}

impl Env {
    /// Minimal-config chain with `count` validators and the genesis block
    /// and state already stored.
    pub fn new(count: u32) -> Self {
        let config = ChainConfig::minimal();
        let keys: Vec<_> = (0..count)
            .map(|i| BlsKeyPair::from_seed(u64::from(i)).unwrap())
            .collect();
        let store = Arc::new(InMemoryBlockStore::new());
        let repo = Arc::new(InMemoryStateRepository::new());
        let bus = Arc::new(InMemoryEventBus::from_config(&config));
        let registry = Arc::new(InMemoryValidatorRegistry::with_validators(
            config.genesis_main_chain_ref,
            validators(&keys, RANDAO_DEPTH),
        ));
        let factory = Arc::new(ShufflingCommitteeFactory::from_config(&config).unwrap());

        let initial = InitialTransition::new(registry.clone(), factory.clone(), config.clone());
        let transition =
            StateTransition::new(store.clone(), factory.clone(), bus.clone(), config.clone());

        let genesis_state = initial.genesis_state().unwrap();
        let state_hash = repo.insert(&genesis_state);
        repo.commit();
        store.save(&Block::genesis(), state_hash, true);

        Self {
            config,
            keys,
            store,
            repo,
            bus,
            registry,
            factory,
            initial,
            transition,
            genesis_state,
        }
    }

    /// Apply an unsigned child of `parent` and store it.
    pub fn extend(
        &self,
        parent: &Block,
        parent_state: &BeaconState,
        slot: Slot,
        attestations: Vec<AttestationRecord>,
    ) -> (Block, BeaconState) {
        let block = Block::new(parent.hash(), [slot as u8; 32], ZERO_HASH, slot, attestations);
        let state = self
            .transition
            .apply_block(&block, parent_state.clone())
            .unwrap();
        let state_hash = self.repo.insert(&state);
        self.store.save(&block, state_hash, true);
        (block, state)
    }

    /// Child of `parent` that passes validation against `parent_state`.
    pub fn signed_child(
        &self,
        parent: &Block,
        parent_state: &BeaconState,
        slot: Slot,
        attestations: Vec<AttestationRecord>,
    ) -> Block {
        let proposer = proposer_index(&parent_state.committees, slot).unwrap();
        let draft = Block::new(parent.hash(), ZERO_HASH, ZERO_HASH, slot, attestations);
        let depth = RANDAO_DEPTH - randao_skips(&draft, parent);
        let mut block = draft;
        block.randao_reveal = hash_chain(&randao_seed(proposer), depth);

        let signed = ProposalSignedData::new(
            slot,
            self.config.beacon_chain_shard_id,
            block.hash_without_signature(),
        );
        let signature = BlsSignatureProvider::new()
            .sign(&signed.hash(), self.keys[proposer as usize].secret())
            .unwrap();
        block.with_signature(signature)
    }
}
