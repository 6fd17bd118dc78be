//! # Shared Bus - Beacon Event Channels
//!
//! Explicit event channels handed to the transition engine, the attestation
//! pool and the duty actors at construction. There is no process-wide
//! subscriber registry: whoever owns an [`InMemoryEventBus`] decides who may
//! publish and who may subscribe.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────┐  AttestationSubmitted   ┌──────────────────┐
//! │  Attester    │ ──────────┐             │ Attestation Pool │
//! └──────────────┘           ▼             │                  │
//!                      ┌──────────────┐    │  add / purge /   │
//! ┌──────────────┐     │  Event Bus   │ ──▶│  remove_old_slots│
//! │ Transition   │ ──▶ │              │    └──────────────────┘
//! │ Engine       │     └──────────────┘
//! └──────────────┘  AttestationIncluded, StateRecalculated, ChainSynced
//! ```
//!
//! Publishing is synchronous so the state transition can stay a plain
//! function; delivery to subscribers is asynchronous.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{BeaconEvent, EventFilter, EventTopic};
pub use publisher::{EventPublisher, InMemoryEventBus, NoopPublisher};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        assert_eq!(DEFAULT_CHANNEL_CAPACITY, 1000);
    }
}
