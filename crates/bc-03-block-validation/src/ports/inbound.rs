//! Driving ports (Inbound API)

use shared_types::Block;

use crate::error::ValidationOutcome;

/// A validator over candidate blocks.
///
/// Verdicts are advisory: the caller decides whether a failing block is
/// rejected or merely discarded.
pub trait BlockValidator: Send + Sync {
    /// Validate `block` and log the verdict.
    ///
    /// `Err` only when validation could not run at all (missing parent
    /// state, corrupted storage).
    fn validate_and_log(&self, block: &Block) -> ValidationOutcome;
}
