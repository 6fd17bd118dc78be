//! A single beacon node with every subsystem wired to one event bus.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use bc_01_shuffling::{proposer_index, ShufflingCommitteeFactory};
use bc_02_attestation_pool::{AttestationPool, PoolEventHandler};
use bc_03_block_validation::ValidationPipeline;
use bc_04_state_transition::{
    ChainProcessor, ImportOutcome, InMemoryValidatorRegistry, InitialTransition, StateTransition,
};
use bc_05_validator_duties::{Attester, DutyEventHandler, Proposer, RandaoChain};
use shared_bus::InMemoryEventBus;
use shared_crypto::{BlsKeyPair, BlsSignatureProvider, SignatureProvider};
use shared_types::storage::{InMemoryBlockStore, InMemoryStateRepository};
use shared_types::{blake2b256, Block, ChainConfig, Slot, Validator, ValidatorIndex};
use tokio::task::JoinHandle;

pub const RANDAO_DEPTH: u64 = 128;

pub fn randao_for(index: ValidatorIndex) -> RandaoChain {
    RandaoChain::new(blake2b256(&u64::from(index).to_be_bytes()), RANDAO_DEPTH)
}

/// Poll `check` until it holds, failing the test after two seconds.
pub async fn eventually<F>(mut check: F)
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::timeout(Duration::from_secs(2), async {
        while !check() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    });
    assert!(deadline.await.is_ok(), "condition not reached in time");
}

/// Await `fut` with the same two second bound.
pub async fn within<T>(fut: impl Future<Output = T>) -> T {
    tokio::time::timeout(Duration::from_secs(2), fut)
        .await
        .expect("timed out")
}

pub struct TestNode {
    pub config: ChainConfig,
    pub keys: Vec<Arc<BlsKeyPair>>,
    pub signer: Arc<dyn SignatureProvider>,
    pub store: Arc<InMemoryBlockStore>,
    pub repo: Arc<InMemoryStateRepository>,
    pub bus: Arc<InMemoryEventBus>,
    pub pool: Arc<AttestationPool>,
    pub transition: StateTransition,
    pub chain: Arc<ChainProcessor>,
    proposers: Vec<Arc<Proposer>>,
    tasks: Vec<JoinHandle<()>>,
}

impl TestNode {
    /// Minimal-config node at genesis with `count` local validators.
    ///
    /// Must be called inside a tokio runtime: the pool and every proposer
    /// get an event loop on the bus.
    pub fn start(count: u32) -> Self {
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
        let pipeline =
            ValidationPipeline::new(store.clone(), repo.clone(), signer.clone(), config.clone());
        let chain = Arc::new(ChainProcessor::new(
            store.clone(),
            repo.clone(),
            Arc::new(pipeline),
            Arc::new(transition.clone()),
            bus.clone(),
        ));
        chain.initialize(&initial).unwrap();

        let mut tasks = vec![PoolEventHandler::new(pool.clone()).spawn(&bus)];
        let proposers: Vec<_> = keys
            .iter()
            .enumerate()
            .map(|(i, kp)| {
                Arc::new(Proposer::new(
                    kp.clone(),
                    randao_for(i as ValidatorIndex),
                    chain.clone(),
                    pool.clone(),
                    transition.clone(),
                    signer.clone(),
                ))
            })
            .collect();
        for proposer in &proposers {
            tasks.push(DutyEventHandler::new(proposer.clone()).spawn(&bus));
        }

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
            proposers,
            tasks,
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

    pub fn proposer(&self, index: ValidatorIndex) -> &Arc<Proposer> {
        &self.proposers[index as usize]
    }

    /// Announce sync and wait until every proposer loop has seen it.
    pub async fn sync(&self) {
        self.chain.announce_synced().unwrap();
        eventually(|| self.proposers.iter().all(|p| p.is_synced())).await;
    }

    /// Proposer of `slot` according to the head state.
    pub fn proposer_for(&self, slot: Slot) -> ValidatorIndex {
        let (_, state) = self.chain.head_state().unwrap();
        proposer_index(&state.committees, slot).unwrap()
    }

    /// Have the assigned validator propose `slot` and import the result.
    pub fn propose_and_import(&self, slot: Slot) -> Block {
        let block = self.proposer(self.proposer_for(slot)).propose(slot).unwrap();
        let outcome = self.chain.import_block(&block).unwrap();
        assert!(
            matches!(outcome, ImportOutcome::Imported { canonical: true, .. }),
            "slot {slot}: {outcome:?}"
        );
        block
    }

    /// Every committee member at the head slot attests to the head.
    pub fn attest_head(&self) -> usize {
        let (head, state) = self.chain.head_state().unwrap();
        (0..self.keys.len() as ValidatorIndex)
            .filter_map(|i| self.attester(i).attest(&head, &state).unwrap())
            .count()
    }
}

impl Drop for TestNode {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}
