//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod allocation;
pub mod donation;
pub mod open_set;
pub mod project;

pub use allocation::AllocationGate;
pub use donation::{CreateDonationInput, DonationError, DonationRepository};
pub use open_set::OpenSet;
pub use project::{
    CharityProjectRepository, CreateProjectInput, ProjectError, UpdateProjectInput,
};
