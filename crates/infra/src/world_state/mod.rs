//! World state boundary.
//!
//! Defines the key-value interface a single invocation reads and writes
//! through, plus an in-memory versioned implementation that provides the
//! commit-or-abort isolation the rest of the system relies on.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::{CommitReceipt, InMemoryWorldState, Transaction};
pub use r#trait::{StateError, WorldState};
