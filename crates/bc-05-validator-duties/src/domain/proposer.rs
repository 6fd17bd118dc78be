//! # Proposer
//!
//! Builds, state-roots and signs the block for a slot the validator is
//! assigned to. Proposing waits for `ChainSynced`.
//!
//! The state root is the hash of the state produced by applying the
//! unsigned draft, computed with a transition that announces nothing so
//! the pool keeps its votes until the block is actually imported.
//!
//! Pooled votes are checked against the head state before inclusion. A vote
//! is dropped when:
//!
//! - it names a justified slot other than the state's source for its slot
//! - its slot predates the last committee change, so no committee can
//!   verify it
//! - an ancestor already included every one of its voters, which happens
//!   when the pool missed the `AttestationIncluded` event

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bc_01_shuffling::proposer_index;
use bc_03_block_validation::{committee_for, randao_skips};
use bc_04_state_transition::StateTransition;
use shared_bus::NoopPublisher;
use shared_crypto::BlsKeyPair;
use shared_types::hashing::short_hex;
use shared_types::{
    AttestationRecord, BeaconState, Block, ChainConfig, Hash, ProposalSignedData, Slot, ZERO_HASH,
};
use tracing::{debug, info};

use super::RandaoChain;
use crate::error::{DutyError, DutyResult};
use crate::ports::{AttestationSource, BlockTransition, HeadProvider, SignatureProvider};

pub struct Proposer {
    keys: Arc<BlsKeyPair>,
    randao: RandaoChain,
    head: Arc<dyn HeadProvider>,
    attestations: Arc<dyn AttestationSource>,
    transition: StateTransition,
    signer: Arc<dyn SignatureProvider>,
    config: ChainConfig,
    main_chain_ref: Hash,
    synced: AtomicBool,
}

impl Proposer {
    pub fn new(
        keys: Arc<BlsKeyPair>,
        randao: RandaoChain,
        head: Arc<dyn HeadProvider>,
        attestations: Arc<dyn AttestationSource>,
        transition: StateTransition,
        signer: Arc<dyn SignatureProvider>,
    ) -> Self {
        let config = transition.config().clone();
        Self {
            keys,
            randao,
            head,
            attestations,
            transition: transition.with_publisher(Arc::new(NoopPublisher)),
            signer,
            main_chain_ref: ZERO_HASH,
            config,
            synced: AtomicBool::new(false),
        }
    }

    /// Main-chain block referenced by proposed blocks.
    pub fn with_main_chain_ref(mut self, main_chain_ref: Hash) -> Self {
        self.main_chain_ref = main_chain_ref;
        self
    }

    pub fn mark_synced(&self) {
        self.synced.store(true, Ordering::Release);
    }

    pub fn is_synced(&self) -> bool {
        self.synced.load(Ordering::Acquire)
    }

    /// Signed block for `slot` on top of the canonical head.
    pub fn propose(&self, slot: Slot) -> DutyResult<Block> {
        if !self.is_synced() {
            return Err(DutyError::NotSynced);
        }

        let (parent, state) = self.head.head_state()?;
        if slot <= parent.slot {
            return Err(DutyError::StaleSlot {
                slot,
                head_slot: parent.slot,
            });
        }

        let (index, _) = state
            .validator_set
            .get_by_pubkey(self.keys.public_key())
            .ok_or(DutyError::UnknownValidator)?;
        if proposer_index(&state.committees, slot) != Some(index) {
            return Err(DutyError::NotProposer { slot });
        }

        let mut attestations: Vec<_> = self
            .attestations
            .attestations_for(slot, state.last_justified_slot)
            .into_iter()
            .filter(|record| includable(&state, record))
            .collect();
        attestations.truncate(self.config.max_attestation_count);

        let mut block = Block::new(parent.hash(), ZERO_HASH, self.main_chain_ref, slot, attestations);
        block.randao_reveal = self.randao.reveal(randao_skips(&block, &parent))?;

        let post_state = self.transition.apply_block(&block, state)?;
        let block = block.with_state_root(post_state.hash());

        let signed = ProposalSignedData::new(
            slot,
            self.config.beacon_chain_shard_id,
            block.hash_without_signature(),
        );
        let signature = self.signer.sign(&signed.hash(), self.keys.secret())?;
        let block = block.with_signature(signature);

        info!(
            slot,
            validator = index,
            hash = %short_hex(&block.hash()),
            attestations = block.attestations.len(),
            "[bc-05] Proposed block"
        );
        Ok(block)
    }
}

/// Whether a pooled record may still go on chain on top of `state`.
fn includable(state: &BeaconState, record: &AttestationRecord) -> bool {
    let data = &record.data;
    if data.justified_slot != state.justification_source_for_slot(data.slot) {
        debug!(
            slot = data.slot,
            justified_slot = data.justified_slot,
            "[bc-05] Skipping vote with stale justification"
        );
        return false;
    }
    if committee_for(state, data.slot, data.shard_id).is_none() {
        debug!(
            slot = data.slot,
            shard_id = data.shard_id,
            change_slot = state.validator_set_change_slot,
            "[bc-05] Skipping vote from before the committee change"
        );
        return false;
    }
    let already_included = state.pending_attestations.iter().any(|pending| {
        pending.data == *data && pending.attester_bitfield.covers(&record.attester_bitfield)
    });
    if already_included {
        debug!(
            slot = data.slot,
            shard_id = data.shard_id,
            "[bc-05] Skipping vote already on chain"
        );
    }
    !already_included
}
