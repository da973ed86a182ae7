//! Explicit pairing of a new entry with its counterpart pool.

use serde::{Deserialize, Serialize};

use crate::ledger::{EntryKind, LedgerEntry};

/// Which way money flows in an allocation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pairing {
    /// A new donation is spread over open projects.
    DonationIntoProjects,
    /// A new project is funded from open donations.
    ProjectIntoDonations,
}

impl Pairing {
    /// Returns the pairing used when an entry of `kind` is created.
    #[must_use]
    pub const fn for_new_entry(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Donation => Self::DonationIntoProjects,
            EntryKind::Project => Self::ProjectIntoDonations,
        }
    }

    /// Returns the pairing for a new entry of type `E`.
    #[must_use]
    pub const fn of<E: LedgerEntry>() -> Self {
        Self::for_new_entry(E::KIND)
    }

    /// Kind of the freshly created entry.
    #[must_use]
    pub const fn new_entry_kind(self) -> EntryKind {
        match self {
            Self::DonationIntoProjects => EntryKind::Donation,
            Self::ProjectIntoDonations => EntryKind::Project,
        }
    }

    /// Kind of the open entries the new entry is matched against.
    #[must_use]
    pub const fn pool_kind(self) -> EntryKind {
        self.new_entry_kind().counterpart()
    }

    /// Returns the pairing as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DonationIntoProjects => "donation_into_projects",
            Self::ProjectIntoDonations => "project_into_donations",
        }
    }
}

impl std::fmt::Display for Pairing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
