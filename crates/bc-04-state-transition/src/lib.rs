//! # bc-04-state-transition
//!
//! Folds validated blocks into beacon state and drives chain import.
//!
//! ```text
//!                ┌──────────────────┐
//! Block ───────→ │ ChainProcessor   │ ──validate──→ [bc-03 ValidationPipeline]
//!                │                  │ ──apply────→ StateTransition ──→ CommitteeFactory
//!                │                  │                  │              (cycle boundary)
//!                └──────────────────┘                  ↓
//!                        │                  AttestationIncluded / StateRecalculated
//!                        ↓                             ↓
//!              BlockStore + StateRepository       [Event Bus]
//! ```
//!
//! `StateTransition` is pure over `(block, state)`; everything it reads or
//! announces goes through the ports it was built with. Genesis has its own
//! entry point, `InitialTransition`.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

pub use adapters::{IdentityValidatorSetTransition, InMemoryValidatorRegistry};
pub use domain::{InitialTransition, StateTransition};
pub use error::{TransitionError, TransitionResult};
pub use ports::{BlockTransition, ValidatorRegistry, ValidatorSetTransition};
pub use service::{ChainHead, ChainProcessor, ImportOutcome};
