//! Allocation error types.

use thiserror::Error;

use crate::ledger::LedgerError;

/// Errors raised by the allocation engine.
///
/// All of them are precondition violations detected before the pass mutates
/// anything.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    /// The new entry is already closed.
    #[error("New entry is already closed")]
    EntryClosed,

    /// The new entry violates a ledger invariant.
    #[error("New entry is inconsistent: {0}")]
    InvalidEntry(#[source] LedgerError),

    /// A counterpart in the open set is closed.
    #[error("Counterpart at position {index} is closed")]
    CounterpartClosed {
        /// Position in the supplied open set.
        index: usize,
    },

    /// A counterpart violates a ledger invariant.
    #[error("Counterpart at position {index} is inconsistent: {source}")]
    InvalidCounterpart {
        /// Position in the supplied open set.
        index: usize,
        /// The violated invariant.
        #[source]
        source: LedgerError,
    },

    /// Closing an entry failed mid-pass.
    #[error("Closure failed: {0}")]
    Closure(#[from] LedgerError),
}
