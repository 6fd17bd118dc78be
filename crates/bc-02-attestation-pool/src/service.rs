//! # Pool Event Handler
//!
//! Routes bus events into the pool:
//!
//! | Event | Action |
//! |-------|--------|
//! | `AttestationSubmitted` | `add_single` |
//! | `AttestationIncluded` | `purge` |
//! | `StateRecalculated { slot }` | `remove_old_slots(slot - cycle_length)` |
//! | `ChainSynced` | logged |
//!
//! Events lost to bus lag are counted in `attestation_pool_events_lagged_total`.
//! A missed `AttestationIncluded` leaves votes pooled until their slot ages
//! out; the proposer skips any that the head state already holds.

use std::sync::Arc;

use shared_bus::{BeaconEvent, EventFilter, EventTopic, InMemoryEventBus, Subscription};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::AttestationPool;
use crate::error::PoolResult;
use crate::metrics;

/// Feeds bus events to an [`AttestationPool`].
#[derive(Clone)]
pub struct PoolEventHandler {
    pool: Arc<AttestationPool>,
}

impl PoolEventHandler {
    pub fn new(pool: Arc<AttestationPool>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Arc<AttestationPool> {
        &self.pool
    }

    /// The filter a handler subscription should use.
    pub fn filter() -> EventFilter {
        EventFilter::topics(vec![
            EventTopic::Attestations,
            EventTopic::StateTransition,
            EventTopic::Sync,
        ])
    }

    /// Apply one event synchronously.
    pub fn handle_event(&self, event: BeaconEvent) -> PoolResult<()> {
        match event {
            BeaconEvent::AttestationSubmitted(record) => self.pool.add_single(record)?,
            BeaconEvent::AttestationIncluded(record) => self.pool.purge(&record),
            BeaconEvent::StateRecalculated { slot } => {
                let cycle_length = self.pool.config().cycle_length;
                self.pool.remove_old_slots(slot.saturating_sub(cycle_length));
            }
            BeaconEvent::ChainSynced { head_slot, .. } => {
                debug!(head_slot, "[bc-02] chain synced");
            }
        }
        Ok(())
    }

    /// Subscribe to `bus` and handle events on a background task until the
    /// bus is dropped.
    pub fn spawn(self, bus: &InMemoryEventBus) -> JoinHandle<()> {
        let subscription = bus.subscribe(Self::filter());
        self.spawn_with(subscription)
    }

    /// Handle events from an existing subscription on a background task.
    pub fn spawn_with(self, mut subscription: Subscription) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!("[bc-02] attestation pool event loop started");
            let mut lagged = subscription.lagged();
            while let Some(event) = subscription.recv().await {
                let total = subscription.lagged();
                if total > lagged {
                    metrics::record_lagged(total - lagged);
                    warn!(missed = total - lagged, "[bc-02] pool fell behind the bus");
                    lagged = total;
                }
                let kind = event.kind();
                if let Err(e) = self.handle_event(event) {
                    warn!(event = kind, error = %e, "[bc-02] event rejected");
                }
            }
            info!("[bc-02] event bus closed, pool event loop stopped");
        })
    }
}
