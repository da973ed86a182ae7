//! Core business logic for QRKot.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Donations and charity projects are reconciled here; persisting the results is
//! the caller's job.
//!
//! # Modules
//!
//! - `ledger` - Shared ledger fields, entry kinds and the closure policy
//! - `allocation` - Greedy first-come-first-served matching of donations and projects
//! - `reports` - Completion report over fully funded projects

pub mod allocation;
pub mod ledger;
pub mod reports;
