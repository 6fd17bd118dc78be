//! Rule plumbing shared by every validator.

use shared_crypto::SignatureProvider;
use shared_types::{BeaconState, Block, ChainConfig};

use super::ValidationResult;

/// Everything a rule may read: the parent block and the state it produced.
pub struct ValidationContext<'a> {
    pub parent: &'a Block,
    pub state: &'a BeaconState,
    pub config: &'a ChainConfig,
    pub signer: &'a dyn SignatureProvider,
}

/// A single validation rule.
pub type Rule = fn(&Block, &ValidationContext<'_>) -> ValidationResult;

/// Run `rules` in order, stopping at the first non-success verdict.
pub fn run_rules(rules: &[Rule], block: &Block, ctx: &ValidationContext<'_>) -> ValidationResult {
    rules
        .iter()
        .map(|rule| rule(block, ctx))
        .find(|result| !result.is_success())
        .unwrap_or(ValidationResult::Success)
}
