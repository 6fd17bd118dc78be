//! # Proposer Rules
//!
//! 1. The slot has an assigned proposer.
//! 2. The proposer signed `ProposalSignedData(slot, beacon shard, hash without signature)`.
//! 3. The RANDAO reveal hashes forward to the proposer's commitment.

use bc_01_shuffling::proposer_index;
use shared_types::{hash_chain, Block, ProposalSignedData, Validator};

use super::{Rule, ValidationContext, ValidationResult};

/// Proposer rules in evaluation order.
pub const PROPOSER_RULES: [Rule; 3] = [proposer_index_rule, proposer_signature_rule, randao_reveal_rule];

fn proposer<'a>(block: &Block, ctx: &ValidationContext<'a>) -> Option<&'a Validator> {
    let index = proposer_index(&ctx.state.committees, block.slot)?;
    ctx.state.validator_set.get(index)
}

/// Hash applications needed to reach the commitment from the reveal.
pub fn randao_skips(block: &Block, parent: &Block) -> u64 {
    if parent.is_genesis() {
        1
    } else {
        block.slot.saturating_sub(parent.slot)
    }
}

fn proposer_index_rule(block: &Block, ctx: &ValidationContext<'_>) -> ValidationResult {
    match proposer(block, ctx) {
        Some(_) => ValidationResult::Success,
        None => ValidationResult::InvalidProposerIndex,
    }
}

fn proposer_signature_rule(block: &Block, ctx: &ValidationContext<'_>) -> ValidationResult {
    let Some(proposer) = proposer(block, ctx) else {
        return ValidationResult::InvalidProposerIndex;
    };

    let signed = ProposalSignedData::new(
        block.slot,
        ctx.config.beacon_chain_shard_id,
        block.hash_without_signature(),
    );

    if ctx
        .signer
        .verify(&block.signature, &signed.hash(), &proposer.pubkey)
    {
        ValidationResult::Success
    } else {
        ValidationResult::InvalidProposerSignature
    }
}

fn randao_reveal_rule(block: &Block, ctx: &ValidationContext<'_>) -> ValidationResult {
    let Some(proposer) = proposer(block, ctx) else {
        return ValidationResult::InvalidProposerIndex;
    };

    let image = hash_chain(&block.randao_reveal, randao_skips(block, ctx.parent));
    if image == proposer.randao_commitment {
        ValidationResult::Success
    } else {
        ValidationResult::InvalidRandaoReveal
    }
}
