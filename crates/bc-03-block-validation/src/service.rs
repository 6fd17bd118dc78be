//! # Validation Pipeline
//!
//! Structural check, then proposer rules, then attestation rules. The first
//! failing rule decides the verdict.

use std::sync::Arc;

use shared_crypto::SignatureProvider;
use shared_types::hashing::short_hex;
use shared_types::storage::{BlockStore, StateRepository};
use shared_types::{BeaconState, Block, ChainConfig};
use tracing::{debug, warn};

use crate::domain::{run_rules, ValidationContext, ValidationResult, ATTESTATION_RULES, PROPOSER_RULES};
use crate::error::{ValidationError, ValidationOutcome};
use crate::metrics;
use crate::ports::BlockValidator;

/// Block validator reading parents and their post-states from storage.
pub struct ValidationPipeline {
    store: Arc<dyn BlockStore>,
    repo: Arc<dyn StateRepository>,
    signer: Arc<dyn SignatureProvider>,
    config: ChainConfig,
}

impl ValidationPipeline {
    pub fn new(
        store: Arc<dyn BlockStore>,
        repo: Arc<dyn StateRepository>,
        signer: Arc<dyn SignatureProvider>,
        config: ChainConfig,
    ) -> Self {
        Self {
            store,
            repo,
            signer,
            config,
        }
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Validate `block` against an already loaded parent and parent state.
    pub fn validate_against(
        &self,
        block: &Block,
        parent: &Block,
        state: &BeaconState,
    ) -> ValidationResult {
        let ctx = ValidationContext {
            parent,
            state,
            config: &self.config,
            signer: self.signer.as_ref(),
        };

        match run_rules(&PROPOSER_RULES, block, &ctx) {
            ValidationResult::Success => run_rules(&ATTESTATION_RULES, block, &ctx),
            failure => failure,
        }
    }

    fn validate(&self, block: &Block) -> ValidationOutcome {
        let Some(parent) = self.store.get_by_hash(&block.parent_hash)? else {
            return Ok(ValidationResult::UnknownParent);
        };

        let missing = || ValidationError::ParentStateMissing {
            parent: block.parent_hash,
        };
        let state_hash = self.store.post_state_hash(&block.parent_hash).ok_or_else(missing)?;
        let state = self.repo.get(&state_hash)?.ok_or_else(missing)?;

        Ok(self.validate_against(block, &parent, &state))
    }
}

impl BlockValidator for ValidationPipeline {
    fn validate_and_log(&self, block: &Block) -> ValidationOutcome {
        let result = self.validate(block)?;
        metrics::record_verdict(result.as_str());

        if result.is_success() {
            debug!(
                slot = block.slot,
                hash = %short_hex(&block.hash()),
                "[bc-03] Block is valid"
            );
        } else {
            warn!(
                slot = block.slot,
                hash = %short_hex(&block.hash()),
                %result,
                "[bc-03] Block validation failed"
            );
        }
        Ok(result)
    }
}
