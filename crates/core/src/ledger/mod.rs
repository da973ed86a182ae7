//! Ledger model shared by donations and charity projects.
//!
//! This module implements:
//! - The composed ledger fields (capacity, running total, lifecycle)
//! - Donation and project types
//! - The closure policy
//! - Error types for invariant violations

pub mod closure;
pub mod entry;
pub mod error;
pub mod types;

pub use closure::close;
pub use entry::{EntryKind, LedgerEntry, LedgerFields};
pub use error::LedgerError;
pub use types::{Donation, Project};
