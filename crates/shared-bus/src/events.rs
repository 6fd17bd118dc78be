//! # Beacon Events
//!
//! Every event that flows through the bus, plus topic-based filtering.

use serde::{Deserialize, Serialize};
use shared_types::entities::{AttestationRecord, Hash, Slot};

/// Events exchanged between beacon subsystems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeaconEvent {
    // =========================================================================
    // VALIDATOR DUTIES
    // =========================================================================
    /// A locally produced or gossiped single-vote attestation.
    /// Source: attester duty / gossip | Target: attestation pool
    AttestationSubmitted(AttestationRecord),

    // =========================================================================
    // STATE TRANSITION
    // =========================================================================
    /// An attestation was included by an applied block.
    /// Source: transition engine | Target: attestation pool (purge)
    AttestationIncluded(AttestationRecord),

    /// A cycle boundary was crossed.
    /// Source: transition engine | Target: attestation pool (prune)
    StateRecalculated {
        /// The new cycle-aligned recalculation slot.
        slot: Slot,
    },

    // =========================================================================
    // CHAIN PROCESSING
    // =========================================================================
    /// The local node is caught up with the network head.
    /// Source: chain processor | Target: proposer duty
    ChainSynced {
        /// Slot of the canonical head.
        head_slot: Slot,
        /// Hash of the canonical head.
        head_hash: Hash,
    },
}

impl BeaconEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::AttestationSubmitted(_) | Self::AttestationIncluded(_) => {
                EventTopic::Attestations
            }
            Self::StateRecalculated { .. } => EventTopic::StateTransition,
            Self::ChainSynced { .. } => EventTopic::Sync,
        }
    }

    /// Short name for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AttestationSubmitted(_) => "attestation_submitted",
            Self::AttestationIncluded(_) => "attestation_included",
            Self::StateRecalculated { .. } => "state_recalculated",
            Self::ChainSynced { .. } => "chain_synced",
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Submitted and included attestations.
    Attestations,
    /// Cycle recalculation notices.
    StateTransition,
    /// Sync status changes.
    Sync,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self { topics }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &BeaconEvent) -> bool {
        self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_topic_mapping() {
        let event = BeaconEvent::StateRecalculated { slot: 64 };
        assert_eq!(event.topic(), EventTopic::StateTransition);
        assert_eq!(event.kind(), "state_recalculated");

        let event = BeaconEvent::AttestationIncluded(AttestationRecord::default());
        assert_eq!(event.topic(), EventTopic::Attestations);
    }

    #[test]
    fn test_filter_all() {
        let filter = EventFilter::all();
        assert!(filter.matches(&BeaconEvent::ChainSynced {
            head_slot: 1,
            head_hash: [0u8; 32],
        }));
    }

    #[test]
    fn test_filter_by_topic() {
        let filter = EventFilter::topics(vec![EventTopic::Attestations]);

        let submitted = BeaconEvent::AttestationSubmitted(AttestationRecord::default());
        assert!(filter.matches(&submitted));

        let recalculated = BeaconEvent::StateRecalculated { slot: 8 };
        assert!(!filter.matches(&recalculated));
    }

    #[test]
    fn test_event_serde_roundtrip() {
        let event = BeaconEvent::ChainSynced {
            head_slot: 12,
            head_hash: [7u8; 32],
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: BeaconEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
