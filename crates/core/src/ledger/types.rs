//! Donation and charity project domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entry::{EntryKind, LedgerEntry, LedgerFields};

/// A charity project collecting money towards a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project ID.
    pub id: i32,
    /// Unique display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Target amount, running total and lifecycle.
    pub ledger: LedgerFields,
}

impl Project {
    /// Creates a new open project.
    #[must_use]
    pub fn new(
        id: i32,
        name: impl Into<String>,
        description: impl Into<String>,
        full_amount: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            ledger: LedgerFields::open(full_amount, created_at),
        }
    }
}

impl LedgerEntry for Project {
    const KIND: EntryKind = EntryKind::Project;
    type Counterpart = Donation;

    fn ledger(&self) -> &LedgerFields {
        &self.ledger
    }

    fn ledger_mut(&mut self) -> &mut LedgerFields {
        &mut self.ledger
    }
}

/// A donation made by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donation {
    /// Donation ID.
    pub id: i32,
    /// User who made the donation.
    pub user_id: Uuid,
    /// Optional comment.
    pub comment: Option<String>,
    /// Donated amount, running total and lifecycle.
    pub ledger: LedgerFields,
}

impl Donation {
    /// Creates a new open donation.
    #[must_use]
    pub const fn new(
        id: i32,
        user_id: Uuid,
        comment: Option<String>,
        full_amount: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            comment,
            ledger: LedgerFields::open(full_amount, created_at),
        }
    }
}

impl LedgerEntry for Donation {
    const KIND: EntryKind = EntryKind::Donation;
    type Counterpart = Project;

    fn ledger(&self) -> &LedgerFields {
        &self.ledger
    }

    fn ledger_mut(&mut self) -> &mut LedgerFields {
        &mut self.ledger
    }
}
