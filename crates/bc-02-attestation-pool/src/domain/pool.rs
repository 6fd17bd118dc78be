//! # Attestation Pool
//!
//! Single-voter attestation records grouped by the fingerprint of their
//! vote content (`AttestationData::hash`). Each group merges into one
//! block-includable record on demand.
//!
//! All mutations go through one mutex, so concurrent delivery from gossip,
//! duty actors and transition events never interleaves inside a group.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use shared_crypto::SignatureProvider;
use shared_types::{AttestationData, AttestationRecord, Bitfield, ChainConfig, Hash, Slot};
use tracing::{debug, trace, warn};

use crate::error::{PoolError, PoolResult};
use crate::metrics;

/// Votes sharing one fingerprint, keyed by record hash.
#[derive(Debug)]
struct PoolEntry {
    data: AttestationData,
    singles: BTreeMap<Hash, AttestationRecord>,
}

impl PoolEntry {
    fn merge(&self, signer: &dyn SignatureProvider) -> PoolResult<AttestationRecord> {
        let attester_bitfield = self
            .singles
            .values()
            .fold(Bitfield::default(), |acc, r| acc.or(&r.attester_bitfield));
        let poc_bitfield = self
            .singles
            .values()
            .fold(Bitfield::default(), |acc, r| acc.or(&r.poc_bitfield));
        let signatures: Vec<_> = self
            .singles
            .values()
            .map(|r| r.aggregate_signature.clone())
            .collect();
        let aggregate_signature = signer.aggregate_signatures(&signatures)?;

        Ok(AttestationRecord::new(
            self.data.clone(),
            attester_bitfield,
            poc_bitfield,
            aggregate_signature,
        ))
    }
}

/// Pool occupancy snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStatus {
    pub fingerprints: usize,
    pub single_votes: usize,
}

/// Thread-safe attestation pool.
pub struct AttestationPool {
    entries: Mutex<BTreeMap<Hash, PoolEntry>>,
    signer: Arc<dyn SignatureProvider>,
    config: ChainConfig,
}

impl AttestationPool {
    pub fn new(config: ChainConfig, signer: Arc<dyn SignatureProvider>) -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
            signer,
            config,
        }
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Add an unmerged attestation.
    ///
    /// # Errors
    ///
    /// `NotSingleVote` if the attester bitfield does not carry exactly one
    /// vote. Re-adding an identical record is a no-op.
    pub fn add_single(&self, record: AttestationRecord) -> PoolResult<()> {
        let votes = record.attester_bitfield.vote_count();
        if votes != 1 {
            metrics::record_rejected();
            return Err(PoolError::NotSingleVote { votes });
        }

        let fingerprint = record.data.hash();
        let record_hash = record.hash();

        let mut entries = self.entries.lock();
        let entry = entries.entry(fingerprint).or_insert_with(|| PoolEntry {
            data: record.data.clone(),
            singles: BTreeMap::new(),
        });
        entry.singles.insert(record_hash, record);

        trace!(
            slot = entry.data.slot,
            shard = entry.data.shard_id,
            votes = entry.singles.len(),
            "[bc-02] single vote pooled"
        );
        Self::report(&entries);
        Ok(())
    }

    /// One merged record per fingerprint acceptable for a block at
    /// `current_slot`.
    ///
    /// Only the inclusion window filters here. The justified slot a vote must
    /// name depends on the vote's own slot, so `last_justified_slot` does not
    /// exclude anything; the proposer checks justification against its head
    /// state.
    ///
    /// Ordered by (slot, shard, fingerprint). Does not mutate the pool.
    pub fn get_attestations(
        &self,
        current_slot: Slot,
        last_justified_slot: Slot,
    ) -> Vec<AttestationRecord> {
        let entries = self.entries.lock();
        let mut merged: Vec<_> = entries
            .iter()
            .filter(|(_, entry)| {
                self.config
                    .is_attestation_acceptable(entry.data.slot, current_slot)
            })
            .filter_map(|(fingerprint, entry)| match entry.merge(self.signer.as_ref()) {
                Ok(record) => Some((*fingerprint, record)),
                Err(e) => {
                    warn!(
                        slot = entry.data.slot,
                        shard = entry.data.shard_id,
                        error = %e,
                        "[bc-02] skipping fingerprint, cannot aggregate"
                    );
                    None
                }
            })
            .collect();

        merged.sort_by(|(fa, a), (fb, b)| {
            (a.slot(), a.shard_id(), fa).cmp(&(b.slot(), b.shard_id(), fb))
        });
        trace!(
            current_slot,
            last_justified_slot,
            count = merged.len(),
            "[bc-02] merged attestations"
        );
        merged.into_iter().map(|(_, record)| record).collect()
    }

    /// Drop every pooled single vote already covered by `merged`.
    pub fn purge(&self, merged: &AttestationRecord) {
        let fingerprint = merged.data.hash();
        let mut entries = self.entries.lock();

        let Some(entry) = entries.get_mut(&fingerprint) else {
            return;
        };
        let before = entry.singles.len();
        entry
            .singles
            .retain(|_, single| !merged.attester_bitfield.covers(&single.attester_bitfield));
        let removed = before - entry.singles.len();

        if entry.singles.is_empty() {
            entries.remove(&fingerprint);
        }

        debug!(
            slot = merged.slot(),
            shard = merged.shard_id(),
            removed,
            "[bc-02] purged included votes"
        );
        Self::report(&entries);
    }

    /// Drop every fingerprint whose slot is below `before_slot`.
    pub fn remove_old_slots(&self, before_slot: Slot) {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, entry| entry.data.slot >= before_slot);

        debug!(
            before_slot,
            removed = before - entries.len(),
            "[bc-02] pruned old slots"
        );
        Self::report(&entries);
    }

    pub fn status(&self) -> PoolStatus {
        Self::status_of(&self.entries.lock())
    }

    fn status_of(entries: &BTreeMap<Hash, PoolEntry>) -> PoolStatus {
        PoolStatus {
            fingerprints: entries.len(),
            single_votes: entries.values().map(|e| e.singles.len()).sum(),
        }
    }

    fn report(entries: &BTreeMap<Hash, PoolEntry>) {
        let status = Self::status_of(entries);
        metrics::set_pool_size(status.fingerprints, status.single_votes);
    }
}
