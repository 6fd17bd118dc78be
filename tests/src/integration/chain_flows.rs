//! # Chain Flows
//!
//! 1. Attester → bus → pool → proposer → chain processor → bus → pool purge
//! 2. A run of proposals across two cycle boundaries, the second of which
//!    reshuffles committees
//! 3. Votes from before a reshuffle are left out of later blocks
//! 4. Tampered and duplicate blocks never move the head

use bc_04_state_transition::ImportOutcome;
use shared_bus::{BeaconEvent, EventFilter, EventTopic};
use shared_types::{ValidatorIndex, ZERO_HASH};

use super::harness::{eventually, within, TestNode};

#[tokio::test]
async fn test_proposing_waits_for_chain_synced() {
    let node = TestNode::start(16);
    let proposer = node.proposer(node.proposer_for(1));
    assert!(proposer.propose(1).is_err());

    node.sync().await;
    node.propose_and_import(1);
    assert_eq!(node.chain.head().unwrap().slot, 1);
}

#[tokio::test]
async fn test_votes_flow_from_attesters_into_blocks() {
    let node = TestNode::start(16);
    node.sync().await;

    // Genesis committee votes reach the pool over the bus.
    assert_eq!(node.attest_head(), 2);
    eventually(|| node.pool.status().single_votes == 2).await;

    let b1 = node.propose_and_import(1);
    assert_eq!(b1.attestations.len(), 1);
    assert_eq!(b1.attestations[0].attester_bitfield.vote_count(), 2);
    assert_eq!(b1.attestations[0].data.slot, 0);

    // Inclusion purges the pool.
    eventually(|| node.pool.status().single_votes == 0).await;

    // Slot 1 committee votes on b1 and lands in b2.
    assert_eq!(node.attest_head(), 2);
    eventually(|| node.pool.status().single_votes == 2).await;

    let b2 = node.propose_and_import(2);
    assert_eq!(b2.attestations.len(), 1);
    assert_eq!(b2.attestations[0].data.block_hash, b1.hash());
    eventually(|| node.pool.status().single_votes == 0).await;

    let (_, state) = node.chain.head_state().unwrap();
    assert_eq!(state.pending_attestations.len(), 2);
}

#[tokio::test]
async fn test_chain_crosses_cycle_boundaries() {
    let node = TestNode::start(16);
    let mut recalcs = node
        .bus
        .subscribe(EventFilter::topics(vec![EventTopic::StateTransition]));
    node.sync().await;

    let (_, genesis_state) = node.chain.head_state().unwrap();
    for slot in 1..=15 {
        node.propose_and_import(slot);
    }
    assert_eq!(
        within(recalcs.recv()).await,
        Some(BeaconEvent::StateRecalculated { slot: 8 })
    );

    let (_, s15) = node.chain.head_state().unwrap();
    assert_eq!(s15.last_state_recalc, 8);
    assert_eq!(s15.validator_set_change_slot, 0);
    assert_eq!(s15.committees, genesis_state.committees);

    // Sixteen slots since the last change: committees are reshuffled.
    node.propose_and_import(16);
    assert_eq!(
        within(recalcs.recv()).await,
        Some(BeaconEvent::StateRecalculated { slot: 16 })
    );

    let (_, s16) = node.chain.head_state().unwrap();
    assert_eq!(s16.last_state_recalc, 16);
    assert_eq!(s16.validator_set_change_slot, 16);
    assert_ne!(s16.committees, genesis_state.committees);
    assert_eq!(
        s16.recent_block_hashes.len(),
        node.config.recent_block_hashes_len()
    );

    // The new table drives proposer selection from here on.
    for slot in 17..=18 {
        node.propose_and_import(slot);
    }
    assert_eq!(node.chain.head().unwrap().slot, 18);
}

#[tokio::test]
async fn test_votes_from_before_reshuffle_are_skipped() {
    let node = TestNode::start(16);
    node.sync().await;
    for slot in 1..=15 {
        node.propose_and_import(slot);
    }

    // Slot 15 votes arrive only after the reshuffling block at 16.
    let (h15, s15) = node.chain.head_state().unwrap();
    node.propose_and_import(16);
    let late = (0..node.keys.len() as ValidatorIndex)
        .filter_map(|i| node.attester(i).attest(&h15, &s15).unwrap())
        .count();
    assert_eq!(late, 2);
    eventually(|| node.pool.status().single_votes == 2).await;

    let (_, s16) = node.chain.head_state().unwrap();
    assert_eq!(s16.validator_set_change_slot, 16);
    assert!(node.config.is_attestation_acceptable(15, 17));

    // Still inside the window, but no committee can verify them now.
    let b17 = node.propose_and_import(17);
    assert!(b17.attestations.is_empty());
    assert_eq!(node.pool.status().single_votes, 2);

    // The next cycle recalculation prunes them.
    node.propose_and_import(24);
    eventually(|| node.pool.status().single_votes == 0).await;
}

#[tokio::test]
async fn test_skipped_slots_extend_the_window() {
    let node = TestNode::start(16);
    node.sync().await;

    node.propose_and_import(1);
    let b5 = node.propose_and_import(5);

    let (_, state) = node.chain.head_state().unwrap();
    for slot in 2..=5 {
        assert_eq!(state.recent_block_hash_for_slot(slot, 5), Some(b5.hash()));
    }
    assert_eq!(state.recent_block_hash_for_slot(1, 5), Some(ZERO_HASH));
}

#[tokio::test]
async fn test_tampered_and_duplicate_blocks_leave_head_alone() {
    let node = TestNode::start(16);
    node.sync().await;

    let block = node.proposer(node.proposer_for(1)).propose(1).unwrap();
    let mut tampered = block.clone();
    tampered.randao_reveal = [9u8; 32];

    assert!(matches!(
        node.chain.import_block(&tampered).unwrap(),
        ImportOutcome::Rejected(_)
    ));
    assert_eq!(node.chain.head().unwrap().slot, 0);

    assert!(matches!(
        node.chain.import_block(&block).unwrap(),
        ImportOutcome::Imported { canonical: true, .. }
    ));
    assert_eq!(
        node.chain.import_block(&block).unwrap(),
        ImportOutcome::AlreadyKnown
    );
    assert_eq!(node.chain.head().unwrap().hash, block.hash());
}
