//! Domain module for the Committee Shuffler
//!
//! - shuffle: seeded permutation
//! - committees: slicing the permutation into the per-slot table
//! - lookup: read-only queries over a built table

pub mod committees;
pub mod lookup;
pub mod shuffle;

pub use committees::{committees_per_slot, ShufflingCommitteeFactory, ShufflingParams};
pub use lookup::{find_assignment, proposer_index, scan_committees, CommitteeAssignment};
pub use shuffle::shuffle_with_seed;
