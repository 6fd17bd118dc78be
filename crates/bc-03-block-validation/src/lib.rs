//! # bc-03-block-validation
//!
//! Ordered, short-circuiting validation of candidate blocks against the
//! post-state of their parent.
//!
//! ```text
//! Block ──→ Structural ──→ Proposer rules ──→ Attestation rules ──→ Verdict
//!            (parent)      (index, sig,        (count, window,
//!                           RANDAO)             committee, sig)
//! ```
//!
//! A failing rule yields a [`ValidationResult`] verdict. Only a missing
//! parent state or corrupted storage is an error.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

#[cfg(test)]
mod fixtures;

pub use domain::{committee_for, randao_skips, ValidationContext, ValidationResult};
pub use error::{ValidationError, ValidationOutcome};
pub use ports::BlockValidator;
pub use service::ValidationPipeline;
