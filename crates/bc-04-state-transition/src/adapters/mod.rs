//! # Adapters Layer (Hexagonal Architecture)
//!
//! In-memory implementations of the outbound ports.

mod registry;

pub use registry::{IdentityValidatorSetTransition, InMemoryValidatorRegistry};
