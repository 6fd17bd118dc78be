//! Validator registry and validator set transition adapters.

use std::collections::HashMap;

use parking_lot::RwLock;
use shared_types::hashing::short_hex;
use shared_types::{Block, Hash, Validator, ValidatorSet};
use tracing::debug;

use crate::error::{TransitionError, TransitionResult};
use crate::ports::{ValidatorRegistry, ValidatorSetTransition};

/// Registry answering from validators registered per main-chain reference.
#[derive(Default)]
pub struct InMemoryValidatorRegistry {
    deposits: RwLock<HashMap<Hash, Vec<Validator>>>,
}

impl InMemoryValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `validators` at `main_chain_ref`.
    pub fn with_validators(main_chain_ref: Hash, validators: Vec<Validator>) -> Self {
        let registry = Self::new();
        registry.register(main_chain_ref, validators);
        registry
    }

    /// Append `validators` to those known at `main_chain_ref`.
    pub fn register(&self, main_chain_ref: Hash, validators: Vec<Validator>) {
        self.deposits
            .write()
            .entry(main_chain_ref)
            .or_default()
            .extend(validators);
    }
}

impl ValidatorRegistry for InMemoryValidatorRegistry {
    fn query(&self, main_chain_ref: &Hash) -> TransitionResult<Vec<Validator>> {
        let deposits = self.deposits.read();
        let validators = deposits.get(main_chain_ref).ok_or_else(|| {
            TransitionError::ValidatorRegistry(format!(
                "no deposits known at main chain block {}",
                short_hex(main_chain_ref)
            ))
        })?;
        debug!(
            main_chain_ref = %short_hex(main_chain_ref),
            count = validators.len(),
            "[bc-04] Validator registry queried"
        );
        Ok(validators.clone())
    }
}

/// Leaves the validator set untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityValidatorSetTransition;

impl ValidatorSetTransition for IdentityValidatorSetTransition {
    fn apply(&self, _block: &Block, validator_set: ValidatorSet) -> ValidatorSet {
        validator_set
    }
}
