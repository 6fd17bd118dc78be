//! Driven ports (Outbound SPI)
//!
//! Validation reads blocks and states through the shared storage ports and
//! checks signatures through the shared `SignatureProvider`.

pub use shared_crypto::SignatureProvider;
pub use shared_types::storage::{BlockStore, StateRepository};
