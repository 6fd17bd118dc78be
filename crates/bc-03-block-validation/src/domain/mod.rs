//! Domain module for the Validation Pipeline
//!
//! - result: the verdict enum
//! - rules: the rule signature and the short-circuit runner
//! - proposer: proposer index, signature and RANDAO rules
//! - attestations: attestation count and per-attestation rules

pub mod attestations;
pub mod proposer;
pub mod result;
pub mod rules;

pub use attestations::{committee_for, ATTESTATION_RULES};
pub use proposer::{randao_skips, PROPOSER_RULES};
pub use result::ValidationResult;
pub use rules::{run_rules, Rule, ValidationContext};
