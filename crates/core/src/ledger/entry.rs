//! Ledger fields shared by donations and charity projects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::LedgerError;

/// Kind of ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Funding target that absorbs money.
    Project,
    /// Contribution that gives money.
    Donation,
}

impl EntryKind {
    /// Returns the kind this entry is matched against.
    #[must_use]
    pub const fn counterpart(self) -> Self {
        match self {
            Self::Project => Self::Donation,
            Self::Donation => Self::Project,
        }
    }

    /// Returns the kind as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Donation => "donation",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Running totals and lifecycle timestamps of a donation or project.
///
/// Both entry kinds embed this struct; the allocation engine only ever
/// touches these fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerFields {
    /// Total amount the entry can ever absorb (project) or give (donation).
    pub capacity: i64,
    /// Running total already matched.
    pub allocated: i64,
    /// True exactly when `allocated == capacity`.
    pub closed: bool,
    /// Creation timestamp, the matching-order key.
    pub created_at: DateTime<Utc>,
    /// Set once, when the entry closes.
    pub closed_at: Option<DateTime<Utc>>,
}

impl LedgerFields {
    /// Creates fields for a freshly created, open entry.
    #[must_use]
    pub const fn open(capacity: i64, created_at: DateTime<Utc>) -> Self {
        Self {
            capacity,
            allocated: 0,
            closed: false,
            created_at,
            closed_at: None,
        }
    }

    /// Amount still unmatched.
    #[must_use]
    pub const fn remaining(&self) -> i64 {
        self.capacity - self.allocated
    }

    /// Returns true if the entry still accepts allocations.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !self.closed
    }

    /// Time between creation and closure, if closed.
    #[must_use]
    pub fn gathering_time(&self) -> Option<chrono::TimeDelta> {
        self.closed_at.map(|closed_at| closed_at - self.created_at)
    }

    /// Checks the ledger invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant:
    /// - capacity must be positive
    /// - `0 <= allocated <= capacity`
    /// - `closed` iff `allocated == capacity`
    /// - `closed_at` is present iff `closed`
    pub fn check_invariants(&self) -> Result<(), LedgerError> {
        if self.capacity <= 0 {
            return Err(LedgerError::NonPositiveCapacity(self.capacity));
        }
        if self.allocated < 0 {
            return Err(LedgerError::NegativeAllocated(self.allocated));
        }
        if self.allocated > self.capacity {
            return Err(LedgerError::OverAllocated {
                allocated: self.allocated,
                capacity: self.capacity,
            });
        }
        if self.closed != (self.allocated == self.capacity) {
            return Err(LedgerError::ClosedFlagMismatch {
                closed: self.closed,
                allocated: self.allocated,
                capacity: self.capacity,
            });
        }
        if self.closed != self.closed_at.is_some() {
            return Err(LedgerError::ClosedAtMismatch {
                closed: self.closed,
            });
        }
        Ok(())
    }
}

/// An entry that takes part in allocation.
///
/// The counterpart kind is fixed by the type: a donation is always matched
/// against projects and a project against donations.
pub trait LedgerEntry {
    /// Kind of this entry.
    const KIND: EntryKind;

    /// Type of the entries this one is matched against.
    type Counterpart: LedgerEntry<Counterpart = Self>;

    /// Shared ledger fields.
    fn ledger(&self) -> &LedgerFields;

    /// Mutable access to the shared ledger fields.
    fn ledger_mut(&mut self) -> &mut LedgerFields;
}
