//! Donation repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use qrkot_core::allocation::AllocationError;

use super::allocation::{AllocationGate, distribute_donation};
use crate::entities::donations;

/// Error types for donation operations.
#[derive(Debug, thiserror::Error)]
pub enum DonationError {
    /// The allocation pass rejected its input.
    #[error("Allocation failed: {0}")]
    Allocation(#[from] AllocationError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a donation.
#[derive(Debug, Clone)]
pub struct CreateDonationInput {
    /// Donated amount.
    pub full_amount: i64,
    /// Optional comment.
    pub comment: Option<String>,
}

/// Donation repository.
#[derive(Debug, Clone)]
pub struct DonationRepository {
    db: DatabaseConnection,
    gate: AllocationGate,
}

impl DonationRepository {
    /// Creates a new donation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection, gate: AllocationGate) -> Self {
        Self { db, gate }
    }

    /// Records a donation for `user_id` and distributes it over open projects.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert or the allocation pass fails; nothing is
    /// committed in that case.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: CreateDonationInput,
    ) -> Result<donations::Model, DonationError> {
        let _guard = self.gate.acquire().await;
        let txn = self.db.begin().await?;

        let now = Utc::now();
        let inserted = donations::ActiveModel {
            user_id: Set(user_id),
            comment: Set(input.comment),
            full_amount: Set(input.full_amount),
            invested_amount: Set(0),
            fully_invested: Set(false),
            create_date: Set(now.into()),
            close_date: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let donation = distribute_donation::<DonationError>(&txn, inserted.into(), now).await?;
        txn.commit().await?;

        info!(
            donation_id = donation.id,
            user_id = %user_id,
            invested = donation.invested_amount,
            fully_invested = donation.fully_invested,
            "Donation created"
        );
        Ok(donation)
    }

    /// Lists every donation ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(&self) -> Result<Vec<donations::Model>, DonationError> {
        Ok(donations::Entity::find()
            .order_by_asc(donations::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Lists the donations made by `user_id`, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<donations::Model>, DonationError> {
        Ok(donations::Entity::find()
            .filter(donations::Column::UserId.eq(user_id))
            .order_by_asc(donations::Column::Id)
            .all(&self.db)
            .await?)
    }
}
