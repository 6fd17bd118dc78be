//! # Duty Event Handler
//!
//! Unlocks proposing once the chain processor announces `ChainSynced`.

use std::sync::Arc;

use shared_bus::{BeaconEvent, EventFilter, EventTopic, InMemoryEventBus, Subscription};
use tokio::task::JoinHandle;
use tracing::info;

use crate::domain::Proposer;

#[derive(Clone)]
pub struct DutyEventHandler {
    proposer: Arc<Proposer>,
}

impl DutyEventHandler {
    pub fn new(proposer: Arc<Proposer>) -> Self {
        Self { proposer }
    }

    pub fn proposer(&self) -> &Arc<Proposer> {
        &self.proposer
    }

    pub fn filter() -> EventFilter {
        EventFilter::topics(vec![EventTopic::Sync])
    }

    /// Apply one event synchronously.
    pub fn handle_event(&self, event: &BeaconEvent) {
        if let BeaconEvent::ChainSynced { head_slot, .. } = event {
            if !self.proposer.is_synced() {
                info!(head_slot, "[bc-05] Chain synced, proposing enabled");
            }
            self.proposer.mark_synced();
        }
    }

    /// Subscribe to `bus` and handle events on a background task until the
    /// bus is dropped.
    pub fn spawn(self, bus: &InMemoryEventBus) -> JoinHandle<()> {
        let subscription = bus.subscribe(Self::filter());
        self.spawn_with(subscription)
    }

    pub fn spawn_with(self, mut subscription: Subscription) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(event) = subscription.recv().await {
                self.handle_event(&event);
            }
            info!("[bc-05] event bus closed, duty event loop stopped");
        })
    }
}
