//! Shared setup for database integration tests.

#![allow(dead_code)]

use qrkot_db::migration::{Migrator, MigratorTrait};
use qrkot_db::repositories::{
    AllocationGate, CharityProjectRepository, CreateDonationInput, CreateProjectInput,
    DonationRepository,
};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

/// Repositories over a fresh in-memory database sharing one gate.
pub struct TestDb {
    pub db: DatabaseConnection,
    pub projects: CharityProjectRepository,
    pub donations: DonationRepository,
}

/// Connects to a private in-memory SQLite database and runs the migrations.
///
/// A single pooled connection keeps every query on the same in-memory file.
pub async fn setup() -> TestDb {
    let db = qrkot_db::connect("sqlite::memory:", 1, 1)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");

    let gate = AllocationGate::new();
    TestDb {
        projects: CharityProjectRepository::new(db.clone(), gate.clone()),
        donations: DonationRepository::new(db.clone(), gate),
        db,
    }
}

pub fn project_input(name: &str, full_amount: i64) -> CreateProjectInput {
    CreateProjectInput {
        name: name.to_string(),
        description: format!("{name} description"),
        full_amount,
    }
}

pub fn donation_input(full_amount: i64) -> CreateDonationInput {
    CreateDonationInput {
        full_amount,
        comment: None,
    }
}

pub fn user() -> Uuid {
    Uuid::new_v4()
}
