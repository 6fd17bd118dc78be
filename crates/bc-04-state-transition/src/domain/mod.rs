//! Domain module for the State Transition Engine
//!
//! - transition: per-block transition with cycle recalculation
//! - genesis: the initial transition seeding validators and committees

pub mod genesis;
pub mod transition;

#[cfg(test)]
pub(crate) mod testing;

pub use genesis::InitialTransition;
pub use transition::StateTransition;
