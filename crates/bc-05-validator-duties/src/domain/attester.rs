//! # Attester
//!
//! Votes for the head block in the committee the validator sits on for the
//! head slot. The vote carries a single set bit at the validator's committee
//! position and is announced on the bus for the attestation pool.

use std::sync::Arc;

use shared_bus::BeaconEvent;
use shared_crypto::BlsKeyPair;
use shared_types::hashing::short_hex;
use shared_types::{
    AttestationData, AttestationRecord, BeaconState, Bitfield, Block, ChainConfig, ShardId,
    ZERO_HASH,
};
use tracing::{debug, info};

use crate::error::{DutyError, DutyResult};
use crate::ports::{EventPublisher, HeadProvider, SignatureProvider};

pub struct Attester {
    keys: Arc<BlsKeyPair>,
    signer: Arc<dyn SignatureProvider>,
    publisher: Arc<dyn EventPublisher>,
    config: ChainConfig,
}

impl Attester {
    pub fn new(
        keys: Arc<BlsKeyPair>,
        signer: Arc<dyn SignatureProvider>,
        publisher: Arc<dyn EventPublisher>,
        config: ChainConfig,
    ) -> Self {
        Self {
            keys,
            signer,
            publisher,
            config,
        }
    }

    /// Vote content for `head` on `shard_id`, read from the head's post-state.
    pub fn attestation_data(&self, head: &Block, state: &BeaconState, shard_id: ShardId) -> AttestationData {
        let cycle_start = self.config.cycle_start_slot(head.slot);
        let justified_slot = state.justification_source_for_slot(head.slot);

        AttestationData {
            slot: head.slot,
            shard_id,
            block_hash: head.hash(),
            cycle_boundary_hash: state
                .recent_block_hash_for_slot(cycle_start, head.slot)
                .unwrap_or(ZERO_HASH),
            shard_block_hash: ZERO_HASH,
            last_crosslink_hash: state
                .crosslink(shard_id)
                .map(|crosslink| crosslink.hash)
                .unwrap_or(ZERO_HASH),
            justified_slot,
            justified_block_hash: state
                .recent_block_hash_for_slot(justified_slot, head.slot)
                .unwrap_or(ZERO_HASH),
        }
    }

    /// Attest to `head`. `None` when the validator has no committee seat at
    /// the head slot.
    pub fn attest(&self, head: &Block, state: &BeaconState) -> DutyResult<Option<AttestationRecord>> {
        let (index, _) = state
            .validator_set
            .get_by_pubkey(self.keys.public_key())
            .ok_or(DutyError::UnknownValidator)?;

        let seat = state.committees_for_slot(head.slot).and_then(|committees| {
            committees.iter().find_map(|committee| {
                committee
                    .position_of(index)
                    .map(|position| (committee, position))
            })
        });
        let Some((committee, position)) = seat else {
            debug!(slot = head.slot, validator = index, "[bc-05] No committee seat");
            return Ok(None);
        };

        let data = self.attestation_data(head, state, committee.shard_id);
        let signature = self.signer.sign(&data.hash(), self.keys.secret())?;
        let record = AttestationRecord::new(
            data,
            Bitfield::single(committee.len(), position),
            Bitfield::with_capacity(committee.len()),
            signature,
        );

        self.publisher
            .publish(BeaconEvent::AttestationSubmitted(record.clone()));
        info!(
            slot = head.slot,
            shard_id = committee.shard_id,
            validator = index,
            block = %short_hex(&head.hash()),
            "[bc-05] Attested"
        );
        Ok(Some(record))
    }

    /// Attest to the current canonical head.
    pub fn attest_head(&self, head: &dyn HeadProvider) -> DutyResult<Option<AttestationRecord>> {
        let (block, state) = head.head_state()?;
        self.attest(&block, &state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::testing::Node;
    use shared_bus::{EventFilter, EventTopic};

    #[test]
    fn test_committee_member_attests_genesis() {
        let node = Node::new(16);
        let (genesis, state) = node.chain.head_state().unwrap();
        let member = state.committees[0][0].validators[1];
        let mut events = node.bus.subscribe(EventFilter::topics(vec![EventTopic::Attestations]));

        let record = node.attester(member).attest(&genesis, &state).unwrap().unwrap();
        assert_eq!(record.data.slot, 0);
        assert_eq!(record.data.shard_id, state.committees[0][0].shard_id);
        assert_eq!(record.data.block_hash, ZERO_HASH);
        assert_eq!(record.attester_bitfield.vote_count(), 1);
        assert!(record.attester_bitfield.get(1));
        assert_eq!(
            events.try_recv().unwrap(),
            Some(BeaconEvent::AttestationSubmitted(record))
        );
    }

    #[test]
    fn test_non_member_has_no_duty() {
        let node = Node::new(16);
        let (genesis, state) = node.chain.head_state().unwrap();
        let outsider = state.committees[3][0].validators[0];
        assert!(node.attester(outsider).attest(&genesis, &state).unwrap().is_none());
    }

    #[test]
    fn test_unregistered_key_rejected() {
        let node = Node::new(4);
        let stranger = Attester::new(
            Arc::new(BlsKeyPair::from_seed(999).unwrap()),
            node.signer.clone(),
            node.bus.clone(),
            node.config.clone(),
        );
        assert!(matches!(
            stranger.attest_head(node.chain.as_ref()),
            Err(DutyError::UnknownValidator)
        ));
    }

    #[test]
    fn test_signature_covers_data_hash() {
        let node = Node::new(16);
        let (genesis, state) = node.chain.head_state().unwrap();
        let member = state.committees[0][0].validators[0];
        let record = node.attester(member).attest(&genesis, &state).unwrap().unwrap();
        assert!(node.signer.verify(
            &record.aggregate_signature,
            &record.data.hash(),
            node.keys[member as usize].public_key()
        ));
    }
}
