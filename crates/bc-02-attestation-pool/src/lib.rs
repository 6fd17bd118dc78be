//! # bc-02-attestation-pool
//!
//! Collects single-voter attestations and hands merged, block-includable
//! records to the proposer.
//!
//! ```text
//! Attester ──AttestationSubmitted──→ ┌──────────────────┐ ──get_attestations──→ Proposer
//!                                    │ Attestation Pool │
//! Transition ─AttestationIncluded──→ │  (one mutex)     │
//!            ─StateRecalculated───→ └──────────────────┘
//! ```
//!
//! Signatures are combined through the injected `SignatureProvider`; the
//! pool never verifies them. Block validation does.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod domain;
pub mod error;
pub mod metrics;
pub mod service;

pub use domain::{AttestationPool, PoolStatus};
pub use error::{PoolError, PoolResult};
pub use service::PoolEventHandler;
