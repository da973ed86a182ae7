//! Ledger error types for invariant and closure violations.
//!
//! Every variant here is a broken contract rather than a business condition:
//! the boundary layer validates amounts before anything reaches the core.

use thiserror::Error;

/// Errors raised when ledger fields violate their invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Capacity must be strictly positive.
    #[error("Capacity must be positive, got {0}")]
    NonPositiveCapacity(i64),

    /// Allocated amount cannot be negative.
    #[error("Allocated amount cannot be negative, got {0}")]
    NegativeAllocated(i64),

    /// Allocated amount exceeds capacity.
    #[error("Allocated amount {allocated} exceeds capacity {capacity}")]
    OverAllocated {
        /// Running total already matched.
        allocated: i64,
        /// Total capacity of the entry.
        capacity: i64,
    },

    /// The closed flag disagrees with the running total.
    #[error("Closed flag is {closed} but allocated {allocated} of {capacity}")]
    ClosedFlagMismatch {
        /// Stored closed flag.
        closed: bool,
        /// Running total already matched.
        allocated: i64,
        /// Total capacity of the entry.
        capacity: i64,
    },

    /// The close timestamp disagrees with the closed flag.
    #[error("Close timestamp presence does not match closed flag {closed}")]
    ClosedAtMismatch {
        /// Stored closed flag.
        closed: bool,
    },

    /// Entry is already closed.
    #[error("Entry is already closed")]
    AlreadyClosed,

    /// Entry cannot be closed before it is fully allocated.
    #[error("Entry cannot be closed: allocated {allocated} of {capacity}")]
    NotFullyAllocated {
        /// Running total already matched.
        allocated: i64,
        /// Total capacity of the entry.
        capacity: i64,
    },
}
