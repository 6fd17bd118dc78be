//! Deterministic chain fixtures for rule tests.

use bc_01_shuffling::{proposer_index, scan_committees, CommitteeFactory, ShufflingCommitteeFactory};
use shared_crypto::{BlsKeyPair, BlsSignatureProvider, SignatureProvider};
use shared_types::{
    hash_chain, blake2b256, AttestationData, AttestationRecord, BeaconState, Bitfield, Block,
    ChainConfig, Crosslink, Hash, ProposalSignedData, Signature, Slot, Validator, ValidatorIndex,
    ValidatorSet, ZERO_HASH,
};

use crate::domain::ValidationContext;

pub struct Fixture {
    pub config: ChainConfig,
    pub state: BeaconState,
    pub keys: Vec<BlsKeyPair>,
    pub signer: BlsSignatureProvider,
}

/// Validator `index`'s RANDAO preimage.
pub fn reveal_for(index: ValidatorIndex) -> Hash {
    blake2b256(&u64::from(index).to_be_bytes())
}

impl Fixture {
    /// Genesis-like state with `count` validators whose RANDAO commitments
    /// sit `depth` hashes above their reveals.
    pub fn new(count: u32, depth: u64) -> Self {
        let config = ChainConfig::minimal();
        let keys: Vec<_> = (0..count)
            .map(|i| BlsKeyPair::from_seed(u64::from(i)).unwrap())
            .collect();
        let validators = keys
            .iter()
            .enumerate()
            .map(|(i, kp)| Validator {
                pubkey: kp.public_key().clone(),
                withdrawal_shard: 0,
                withdrawal_address: [0u8; 20],
                randao_commitment: hash_chain(&reveal_for(i as u32), depth),
            })
            .collect();
        let validator_set = ValidatorSet::new(validators);
        let committees = ShufflingCommitteeFactory::from_config(&config)
            .unwrap()
            .create(&ZERO_HASH, &validator_set.active_indices(), 0);
        let state = BeaconState::empty(&config)
            .with_validator_set(validator_set)
            .with_committees(committees)
            .with_crosslinks(vec![Crosslink::empty(); config.shard_count as usize]);

        Self {
            config,
            state,
            keys,
            signer: BlsSignatureProvider,
        }
    }

    pub fn context<'a>(&'a self, parent: &'a Block) -> ValidationContext<'a> {
        ValidationContext {
            parent,
            state: &self.state,
            config: &self.config,
            signer: &self.signer,
        }
    }

    pub fn proposer_of(&self, slot: Slot) -> ValidatorIndex {
        proposer_index(&self.state.committees, slot).unwrap()
    }

    pub fn sign_proposal(&self, block: &Block, signer: ValidatorIndex) -> Signature {
        let data = ProposalSignedData::new(
            block.slot,
            self.config.beacon_chain_shard_id,
            block.hash_without_signature(),
        );
        self.signer
            .sign(&data.hash(), self.keys[signer as usize].secret())
            .unwrap()
    }

    /// Block at `slot` on top of `parent`, signed by the assigned proposer.
    pub fn signed_block(
        &self,
        parent: &Block,
        slot: Slot,
        attestations: Vec<AttestationRecord>,
    ) -> Block {
        let proposer = self.proposer_of(slot);
        let block = Block::new(parent.hash(), reveal_for(proposer), ZERO_HASH, slot, attestations);
        let signature = self.sign_proposal(&block, proposer);
        block.with_signature(signature)
    }

    /// Attestation for `slot` by the committee members at `positions`,
    /// consistent with this state when validated against a parent at
    /// `head_slot`.
    pub fn attestation(&self, slot: Slot, head_slot: Slot, positions: &[usize]) -> AttestationRecord {
        self.attestation_with(slot, head_slot, positions, |_| {})
    }

    /// Like [`attestation`](Self::attestation), with `edit` applied to the
    /// vote before the committee signs it.
    pub fn attestation_with(
        &self,
        slot: Slot,
        head_slot: Slot,
        positions: &[usize],
        edit: impl FnOnce(&mut AttestationData),
    ) -> AttestationRecord {
        let offset = (slot % self.state.committees.len() as u64) as usize;
        let shard_id = self.state.committees[offset][0].shard_id;
        let committee = scan_committees(&self.state.committees, offset, shard_id).unwrap();
        let justified_slot = self.state.justification_source_for_slot(slot);

        let mut data = AttestationData {
            slot,
            shard_id: committee.shard_id,
            block_hash: [0xBB; 32],
            cycle_boundary_hash: ZERO_HASH,
            shard_block_hash: ZERO_HASH,
            last_crosslink_hash: self.state.crosslink(committee.shard_id).unwrap().hash,
            justified_slot,
            justified_block_hash: self
                .state
                .recent_block_hash_for_slot(justified_slot, head_slot)
                .unwrap(),
        };
        edit(&mut data);

        let mut bitfield = Bitfield::with_capacity(committee.len());
        let signatures: Vec<_> = positions
            .iter()
            .map(|&position| {
                bitfield.set(position);
                let validator = committee.validators[position];
                self.signer
                    .sign(&data.hash(), self.keys[validator as usize].secret())
                    .unwrap()
            })
            .collect();
        let aggregate = self.signer.aggregate_signatures(&signatures).unwrap();

        AttestationRecord::new(
            data,
            bitfield,
            Bitfield::with_capacity(committee.len()),
            aggregate,
        )
    }
}
