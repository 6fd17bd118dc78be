//! Read-only queries over a committee table.

use shared_types::{Committee, CommitteeTable, ShardId, Slot, ValidatorIndex};

/// Where a validator sits in a committee table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommitteeAssignment {
    /// Slot position within the cycle.
    pub slot_offset: usize,
    /// Index of the committee within that slot.
    pub committee_index: usize,
    pub shard_id: ShardId,
    /// Bit position in the committee's participation bitfield.
    pub position: usize,
    pub committee_size: usize,
}

/// Proposer for `slot`: the first member of the first committee at the
/// slot's cycle position. `None` if that committee is missing or empty.
pub fn proposer_index(committees: &CommitteeTable, slot: Slot) -> Option<ValidatorIndex> {
    if committees.is_empty() {
        return None;
    }
    let offset = (slot % committees.len() as u64) as usize;
    committees
        .get(offset)?
        .first()?
        .validators
        .first()
        .copied()
}

/// Committee serving `shard_id` at cycle position `slot_offset`.
pub fn scan_committees(
    committees: &CommitteeTable,
    slot_offset: usize,
    shard_id: ShardId,
) -> Option<&Committee> {
    committees
        .get(slot_offset)?
        .iter()
        .find(|committee| committee.shard_id == shard_id)
}

/// First position of `validator` in the table, scanning slots in order.
pub fn find_assignment(
    committees: &CommitteeTable,
    validator: ValidatorIndex,
) -> Option<CommitteeAssignment> {
    committees
        .iter()
        .enumerate()
        .find_map(|(slot_offset, slot)| {
            slot.iter()
                .enumerate()
                .find_map(|(committee_index, committee)| {
                    committee
                        .position_of(validator)
                        .map(|position| CommitteeAssignment {
                            slot_offset,
                            committee_index,
                            shard_id: committee.shard_id,
                            position,
                            committee_size: committee.len(),
                        })
                })
        })
}
