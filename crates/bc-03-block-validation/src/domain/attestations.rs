//! # Attestation Rules
//!
//! 1. At most `max_attestation_count` attestations per block.
//! 2. Every attestation is individually consistent with the parent state.
//!
//! The per-attestation checks, in order: inclusion window, justification
//! source, justified block hash, zero shard block hash, crosslink hash,
//! committee lookup, bitfield length and padding, aggregate signature.

use bc_01_shuffling::scan_committees;
use shared_types::{AttestationRecord, BeaconState, Bitfield, Block, Committee, Slot, ShardId, ZERO_HASH};
use tracing::debug;

use super::{Rule, ValidationContext, ValidationResult};

/// Attestation rules in evaluation order.
pub const ATTESTATION_RULES: [Rule; 2] = [max_attestations_rule, common_attestation_rule];

fn max_attestations_rule(block: &Block, ctx: &ValidationContext<'_>) -> ValidationResult {
    if block.attestations.len() > ctx.config.max_attestation_count {
        debug!(
            count = block.attestations.len(),
            max = ctx.config.max_attestation_count,
            "[bc-03] too many attestations"
        );
        return ValidationResult::InvalidAttestations;
    }
    ValidationResult::Success
}

fn common_attestation_rule(block: &Block, ctx: &ValidationContext<'_>) -> ValidationResult {
    for attestation in &block.attestations {
        if let Err(reason) = check_attestation(attestation, block, ctx) {
            debug!(
                slot = attestation.slot(),
                shard_id = attestation.shard_id(),
                reason,
                "[bc-03] attestation rejected"
            );
            return ValidationResult::InvalidAttestations;
        }
    }
    ValidationResult::Success
}

/// Committee serving `shard_id` at the cycle position of `slot`.
pub fn committee_for<'a>(state: &'a BeaconState, slot: Slot, shard_id: ShardId) -> Option<&'a Committee> {
    let offset = slot.checked_sub(state.validator_set_change_slot)?;
    let len = state.committees.len() as u64;
    if len == 0 {
        return None;
    }
    scan_committees(&state.committees, (offset % len) as usize, shard_id)
}

fn check_attestation(
    attestation: &AttestationRecord,
    block: &Block,
    ctx: &ValidationContext<'_>,
) -> Result<(), &'static str> {
    let data = &attestation.data;
    let state = ctx.state;

    if !ctx.config.is_attestation_acceptable(data.slot, block.slot) {
        return Err("outside inclusion window");
    }

    if data.justified_slot != state.justification_source_for_slot(data.slot) {
        return Err("wrong justified slot");
    }

    if state.recent_block_hash_for_slot(data.justified_slot, ctx.parent.slot)
        != Some(data.justified_block_hash)
    {
        return Err("wrong justified block hash");
    }

    // Shard blocks do not exist yet.
    if data.shard_block_hash != ZERO_HASH {
        return Err("non-zero shard block hash");
    }

    let crosslink = state.crosslink(data.shard_id).ok_or("unknown shard")?;
    if data.last_crosslink_hash != crosslink.hash && data.shard_block_hash != crosslink.hash {
        return Err("crosslink hash mismatch");
    }

    let committee = committee_for(state, data.slot, data.shard_id).ok_or("no committee")?;

    let bitfield = &attestation.attester_bitfield;
    if bitfield.byte_len() != Bitfield::byte_length(committee.len()) {
        return Err("bitfield length");
    }
    if bitfield.has_bits_from(committee.len()) {
        return Err("votes beyond committee");
    }

    let public_keys = bitfield
        .set_indices()
        .map(|position| {
            committee
                .validators
                .get(position)
                .and_then(|&index| state.validator_set.get(index))
                .map(|validator| validator.pubkey.clone())
                .ok_or("unknown attester")
        })
        .collect::<Result<Vec<_>, _>>()?;

    let aggregate_key = ctx
        .signer
        .aggregate_public_keys(&public_keys)
        .map_err(|_| "cannot aggregate attester keys")?;

    if !ctx
        .signer
        .verify(&attestation.aggregate_signature, &data.hash(), &aggregate_key)
    {
        return Err("aggregate signature");
    }

    Ok(())
}
