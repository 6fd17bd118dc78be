//! # Chain Processor
//!
//! The block-processing path: validate, apply, persist the block with its
//! post-state, commit. Imports are serialized; a block extending the
//! current head becomes the new canonical head, any other valid block is
//! stored off the canonical chain.

use std::sync::Arc;

use bc_03_block_validation::{BlockValidator, ValidationResult};
use parking_lot::Mutex;
use shared_bus::BeaconEvent;
use shared_types::hashing::short_hex;
use shared_types::{BeaconState, Block, Hash, Slot, ZERO_HASH};
use tracing::{debug, info, warn};

use crate::domain::InitialTransition;
use crate::error::{TransitionError, TransitionResult};
use crate::metrics;
use crate::ports::{BlockStore, BlockTransition, EventPublisher, StateRepository};

/// Result of importing a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportOutcome {
    /// Applied and stored; `state_hash` is the post-state.
    Imported { state_hash: Hash, canonical: bool },
    /// Already stored, nothing done.
    AlreadyKnown,
    /// Failed validation, nothing stored.
    Rejected(ValidationResult),
}

/// Canonical head of the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChainHead {
    pub slot: Slot,
    pub hash: Hash,
    pub state_hash: Hash,
}

pub struct ChainProcessor {
    store: Arc<dyn BlockStore>,
    repo: Arc<dyn StateRepository>,
    validator: Arc<dyn BlockValidator>,
    transition: Arc<dyn BlockTransition>,
    publisher: Arc<dyn EventPublisher>,
    head: Mutex<Option<ChainHead>>,
}

impl ChainProcessor {
    pub fn new(
        store: Arc<dyn BlockStore>,
        repo: Arc<dyn StateRepository>,
        validator: Arc<dyn BlockValidator>,
        transition: Arc<dyn BlockTransition>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            store,
            repo,
            validator,
            transition,
            publisher,
            head: Mutex::new(None),
        }
    }

    /// Store the genesis block and state, or adopt them if already stored.
    pub fn initialize(&self, initial: &InitialTransition) -> TransitionResult<ChainHead> {
        let mut head = self.head.lock();

        let state_hash = match self.store.post_state_hash(&ZERO_HASH) {
            Some(state_hash) => {
                debug!("[bc-04] Genesis already stored");
                state_hash
            }
            None => {
                let state = initial.genesis_state()?;
                let state_hash = self.repo.insert(&state);
                self.repo.commit();
                self.store.save(&Block::genesis(), state_hash, true);
                info!(
                    state_hash = %short_hex(&state_hash),
                    "[bc-04] Genesis stored"
                );
                state_hash
            }
        };

        let genesis = ChainHead {
            slot: 0,
            hash: ZERO_HASH,
            state_hash,
        };
        *head = Some(genesis);
        metrics::set_head_slot(0);
        Ok(genesis)
    }

    pub fn head(&self) -> Option<ChainHead> {
        *self.head.lock()
    }

    /// The canonical head block and the state it produced.
    pub fn head_state(&self) -> TransitionResult<(Block, BeaconState)> {
        let head = self.head().ok_or(TransitionError::NotInitialized)?;
        let block = self
            .store
            .get_by_hash(&head.hash)?
            .ok_or(TransitionError::ParentBlockMissing { parent: head.hash })?;
        let state = self
            .repo
            .get(&head.state_hash)?
            .ok_or(TransitionError::ParentStateMissing { parent: head.hash })?;
        Ok((block, state))
    }

    /// Announce that the local chain is caught up.
    pub fn announce_synced(&self) -> TransitionResult<ChainHead> {
        let head = self.head().ok_or(TransitionError::NotInitialized)?;
        self.publisher.publish(BeaconEvent::ChainSynced {
            head_slot: head.slot,
            head_hash: head.hash,
        });
        info!(slot = head.slot, hash = %short_hex(&head.hash), "[bc-04] Chain synced");
        Ok(head)
    }

    /// Validate, apply and persist `block`.
    pub fn import_block(&self, block: &Block) -> TransitionResult<ImportOutcome> {
        let mut head = self.head.lock();
        let current = head.ok_or(TransitionError::NotInitialized)?;

        let hash = block.hash();
        if self.store.post_state_hash(&hash).is_some() {
            debug!(slot = block.slot, hash = %short_hex(&hash), "[bc-04] Block already known");
            return Ok(ImportOutcome::AlreadyKnown);
        }

        let verdict = self.validator.validate_and_log(block)?;
        if !verdict.is_success() {
            return Ok(ImportOutcome::Rejected(verdict));
        }

        let parent = block.parent_hash;
        let parent_state_hash = self
            .store
            .post_state_hash(&parent)
            .ok_or(TransitionError::ParentStateMissing { parent })?;
        let parent_state = self
            .repo
            .get(&parent_state_hash)?
            .ok_or(TransitionError::ParentStateMissing { parent })?;

        let state = self.transition.apply_block(block, parent_state)?;
        let state_hash = self.repo.insert(&state);

        let canonical = parent == current.hash;
        self.store.save(block, state_hash, canonical);
        self.repo.commit();

        if canonical {
            *head = Some(ChainHead {
                slot: block.slot,
                hash,
                state_hash,
            });
            metrics::set_head_slot(block.slot);
            info!(
                slot = block.slot,
                hash = %short_hex(&hash),
                attestations = block.attestations.len(),
                "[bc-04] Imported block"
            );
        } else {
            warn!(
                slot = block.slot,
                hash = %short_hex(&hash),
                head_slot = current.slot,
                "[bc-04] Imported block off the canonical chain"
            );
        }

        Ok(ImportOutcome::Imported {
            state_hash,
            canonical,
        })
    }
}
