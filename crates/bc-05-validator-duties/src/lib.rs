//! # bc-05-validator-duties
//!
//! What a local validator does each slot.
//!
//! ```text
//! head ──→ Attester ──AttestationSubmitted──→ [Event Bus] ──→ [bc-02 pool]
//!                                                                  │
//! ChainSynced ──→ Proposer ←──────── attestations_for(slot) ───────┘
//!                    │
//!                    └──→ signed block ──→ [bc-04 ChainProcessor]
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use domain::{Attester, Proposer, RandaoChain};
pub use error::{DutyError, DutyResult};
pub use ports::{AttestationSource, HeadProvider};
pub use service::DutyEventHandler;
