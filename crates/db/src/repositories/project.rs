//! Charity project repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::info;

use qrkot_core::allocation::AllocationError;
use qrkot_core::ledger::{Project, close};
use qrkot_core::reports::{CompletionRow, ReportService};

use super::allocation::{AllocationGate, fund_project};
use crate::entities::charity_projects;

/// Error types for charity project operations.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// Project not found.
    #[error("Charity project not found: {0}")]
    NotFound(i32),

    /// Another project already uses this name.
    #[error("Charity project with name '{0}' already exists")]
    DuplicateName(String),

    /// Fully invested projects cannot be edited.
    #[error("Charity project {0} is closed and cannot be edited")]
    Closed(i32),

    /// Projects that received money cannot be deleted.
    #[error("Charity project {0} has received donations and cannot be deleted")]
    AlreadyInvested(i32),

    /// Requested target is below what the project already collected.
    #[error("Full amount {full_amount} is below the invested amount {invested_amount}")]
    CapacityBelowInvested {
        /// Requested target.
        full_amount: i64,
        /// Amount already collected.
        invested_amount: i64,
    },

    /// The allocation pass rejected its input.
    #[error("Allocation failed: {0}")]
    Allocation(#[from] AllocationError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a charity project.
#[derive(Debug, Clone)]
pub struct CreateProjectInput {
    /// Unique display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Target amount.
    pub full_amount: i64,
}

/// Input for editing a charity project. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateProjectInput {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New target amount.
    pub full_amount: Option<i64>,
}

impl UpdateProjectInput {
    /// Returns true if no field is being changed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.full_amount.is_none()
    }
}

/// Charity project repository.
#[derive(Debug, Clone)]
pub struct CharityProjectRepository {
    db: DatabaseConnection,
    gate: AllocationGate,
}

impl CharityProjectRepository {
    /// Creates a new charity project repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection, gate: AllocationGate) -> Self {
        Self { db, gate }
    }

    /// Creates a project and funds it from the open donations.
    ///
    /// The insert and the allocation pass commit together.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::DuplicateName` if the name is taken, or a
    /// database/allocation error.
    pub async fn create(
        &self,
        input: CreateProjectInput,
    ) -> Result<charity_projects::Model, ProjectError> {
        let _guard = self.gate.acquire().await;
        let txn = self.db.begin().await?;

        ensure_name_free(&txn, &input.name, None).await?;

        let now = Utc::now();
        let inserted = charity_projects::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            full_amount: Set(input.full_amount),
            invested_amount: Set(0),
            fully_invested: Set(false),
            create_date: Set(now.into()),
            close_date: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let project = fund_project::<ProjectError>(&txn, inserted.into(), now).await?;
        txn.commit().await?;

        info!(
            project_id = project.id,
            invested = project.invested_amount,
            fully_invested = project.fully_invested,
            "Charity project created"
        );
        Ok(project)
    }

    /// Lists every project ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<charity_projects::Model>, ProjectError> {
        Ok(charity_projects::Entity::find()
            .order_by_asc(charity_projects::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Gets a project by id.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::NotFound` if the project does not exist.
    pub async fn get(&self, id: i32) -> Result<charity_projects::Model, ProjectError> {
        charity_projects::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ProjectError::NotFound(id))
    }

    /// Edits an open project.
    ///
    /// Setting the target to exactly the invested amount closes the project.
    /// Raising the target does not start a new allocation pass.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The project does not exist or is closed
    /// - The new name belongs to another project
    /// - The new target is below the invested amount
    pub async fn update(
        &self,
        id: i32,
        input: UpdateProjectInput,
    ) -> Result<charity_projects::Model, ProjectError> {
        let _guard = self.gate.acquire().await;
        let txn = self.db.begin().await?;

        let existing = charity_projects::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(ProjectError::NotFound(id))?;

        if existing.fully_invested {
            return Err(ProjectError::Closed(id));
        }
        if input.is_empty() {
            txn.commit().await?;
            return Ok(existing);
        }
        if let Some(name) = &input.name {
            ensure_name_free(&txn, name, Some(id)).await?;
        }

        let mut project = Project::from(existing.clone());
        if let Some(full_amount) = input.full_amount {
            if full_amount < project.ledger.allocated {
                return Err(ProjectError::CapacityBelowInvested {
                    full_amount,
                    invested_amount: project.ledger.allocated,
                });
            }
            project.ledger.capacity = full_amount;
            if full_amount == project.ledger.allocated {
                close(&mut project.ledger, Utc::now()).map_err(AllocationError::from)?;
            }
        }

        let mut active: charity_projects::ActiveModel = existing.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if input.full_amount.is_some() {
            active.full_amount = Set(project.ledger.capacity);
            active.fully_invested = Set(project.ledger.closed);
            active.close_date = Set(project.ledger.closed_at.map(Into::into));
        }

        let updated = active.update(&txn).await?;
        txn.commit().await?;

        info!(
            project_id = id,
            fully_invested = updated.fully_invested,
            "Charity project updated"
        );
        Ok(updated)
    }

    /// Deletes a project that has not received any money.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::NotFound` or `ProjectError::AlreadyInvested`.
    pub async fn delete(&self, id: i32) -> Result<charity_projects::Model, ProjectError> {
        let _guard = self.gate.acquire().await;
        let txn = self.db.begin().await?;

        let existing = charity_projects::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(ProjectError::NotFound(id))?;

        if existing.invested_amount > 0 {
            return Err(ProjectError::AlreadyInvested(id));
        }

        charity_projects::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        info!(project_id = id, "Charity project deleted");
        Ok(existing)
    }

    /// Builds the completion report over every closed project.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn completion_report(&self) -> Result<Vec<CompletionRow>, ProjectError> {
        let closed: Vec<Project> = charity_projects::Entity::find()
            .filter(charity_projects::Column::FullyInvested.eq(true))
            .order_by_asc(charity_projects::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Project::from)
            .collect();

        Ok(ReportService::completion_report(&closed))
    }
}

/// Fails if another project already carries `name`.
async fn ensure_name_free(
    txn: &DatabaseTransaction,
    name: &str,
    except: Option<i32>,
) -> Result<(), ProjectError> {
    let mut query =
        charity_projects::Entity::find().filter(charity_projects::Column::Name.eq(name));
    if let Some(id) = except {
        query = query.filter(charity_projects::Column::Id.ne(id));
    }

    if query.one(txn).await?.is_some() {
        return Err(ProjectError::DuplicateName(name.to_string()));
    }
    Ok(())
}
