//! A wired single-node chain for duty tests.

use std::sync::Arc;

use bc_01_shuffling::{proposer_index, ShufflingCommitteeFactory};
use bc_02_attestation_pool::AttestationPool;
use bc_03_block_validation::ValidationPipeline;
use bc_04_state_transition::{
    ChainProcessor, InMemoryValidatorRegistry, InitialTransition, StateTransition,
};
use shared_bus::InMemoryEventBus;
use shared_crypto::{BlsKeyPair, BlsSignatureProvider, SignatureProvider};
use shared_types::storage::{InMemoryBlockStore, InMemoryStateRepository};
use shared_types::{blake2b256, ChainConfig, Slot, Validator, ValidatorIndex};

use crate::domain::{Attester, Proposer, RandaoChain};

pub const RANDAO_DEPTH: u64 = 64;

pub fn randao_for(index: ValidatorIndex) -> RandaoChain {
    RandaoChain::new(blake2b256(&u64::from(index).to_be_bytes()), RANDAO_DEPTH)
}

pub struct Node {
    pub config: ChainConfig,
    pub keys: Vec<Arc<BlsKeyPair>>,
    pub signer: Arc<dyn SignatureProvider>,
    pub store: Arc<InMemoryBlockStore>,
    pub repo: Arc<InMemoryStateRepository>,
    pub bus: Arc<InMemoryEventBus>,
    pub pool: Arc<AttestationPool>,
    pub transition: StateTransition,
    pub chain: Arc<ChainProcessor>,
}

impl Node {
    /// Initialized chain at genesis with `count` registered validators.
    pub fn new(count: u32) -> Self {
        let config = ChainConfig::minimal();
        let keys: Vec<_> = (0..count)
            .map(|i| Arc::new(BlsKeyPair::from_seed(u64::from(i)).unwrap()))
            .collect();
        let validators = keys
            .iter()
            .enumerate()
            .map(|(i, kp)| Validator {
                pubkey: kp.public_key().clone(),
                withdrawal_shard: 0,
                withdrawal_address: [0u8; 20],
                randao_commitment: randao_for(i as ValidatorIndex).commitment(),
            })
            .collect();

        let signer: Arc<dyn SignatureProvider> = Arc::new(BlsSignatureProvider::new());
        let store = Arc::new(InMemoryBlockStore::new());
        let repo = Arc::new(InMemoryStateRepository::new());
        let bus = Arc::new(InMemoryEventBus::from_config(&config));
        let pool = Arc::new(AttestationPool::new(config.clone(), signer.clone()));
        let factory = Arc::new(ShufflingCommitteeFactory::from_config(&config).unwrap());

        let registry = Arc::new(InMemoryValidatorRegistry::with_validators(
            config.genesis_main_chain_ref,
            validators,
        ));
        let initial = InitialTransition::new(registry, factory.clone(), config.clone());
        let transition = StateTransition::new(store.clone(), factory, bus.clone(), config.clone());
        let validator = ValidationPipeline::new(
            store.clone(),
            repo.clone(),
            signer.clone(),
            config.clone(),
        );
        let chain = Arc::new(ChainProcessor::new(
            store.clone(),
            repo.clone(),
            Arc::new(validator),
            Arc::new(transition.clone()),
            bus.clone(),
        ));
        chain.initialize(&initial).unwrap();

        Self {
            config,
            keys,
            signer,
            store,
            repo,
            bus,
            pool,
            transition,
            chain,
        }
    }

    pub fn attester(&self, index: ValidatorIndex) -> Attester {
        Attester::new(
            self.keys[index as usize].clone(),
            self.signer.clone(),
            self.bus.clone(),
            self.config.clone(),
        )
    }

    pub fn proposer(&self, index: ValidatorIndex) -> Proposer {
        Proposer::new(
            self.keys[index as usize].clone(),
            randao_for(index),
            self.chain.clone(),
            self.pool.clone(),
            self.transition.clone(),
            self.signer.clone(),
        )
    }

    /// Proposer of `slot` according to the head state.
    pub fn proposer_for(&self, slot: Slot) -> ValidatorIndex {
        let (_, state) = self.chain.head_state().unwrap();
        proposer_index(&state.committees, slot).unwrap()
    }
}
