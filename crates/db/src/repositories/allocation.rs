//! Allocation passes executed inside a database transaction.
//!
//! A pass reads the open pool of the opposite kind with row locks, runs the
//! engine in memory and writes back only the rows it touched. The caller owns
//! the transaction and commits it together with the insert of the new entry.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseTransaction, DbErr, Set};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use qrkot_core::allocation::{AllocationEngine, AllocationError, AllocationOutcome};
use qrkot_core::ledger::{Donation, Project};

use super::open_set::OpenSet;
use crate::entities::{charity_projects, donations};

/// In-process gate serializing every operation on running totals.
///
/// Cloning shares the same gate.
#[derive(Debug, Clone, Default)]
pub struct AllocationGate {
    inner: Arc<Mutex<()>>,
}

impl AllocationGate {
    /// Creates a new, unlocked gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to the ledger.
    pub async fn acquire(&self) -> MutexGuard<'_, ()> {
        self.inner.lock().await
    }
}

/// Matches a freshly inserted project against the open donations.
pub(crate) async fn fund_project<E>(
    txn: &DatabaseTransaction,
    mut project: Project,
    now: DateTime<Utc>,
) -> Result<charity_projects::Model, E>
where
    E: From<DbErr> + From<AllocationError>,
{
    let mut pool: Vec<Donation> = OpenSet::donations(txn)
        .await?
        .into_iter()
        .map(Donation::from)
        .collect();

    let outcome = AllocationEngine::allocate(&mut project, &mut pool, now)?;
    log_pass(project.id, &outcome);

    if outcome.is_empty() {
        return Ok(project.into());
    }
    for index in outcome.touched() {
        store_donation(txn, &pool[index]).await?;
    }
    Ok(store_project(txn, &project).await?)
}

/// Distributes a freshly inserted donation over the open projects.
pub(crate) async fn distribute_donation<E>(
    txn: &DatabaseTransaction,
    mut donation: Donation,
    now: DateTime<Utc>,
) -> Result<donations::Model, E>
where
    E: From<DbErr> + From<AllocationError>,
{
    let mut pool: Vec<Project> = OpenSet::projects(txn)
        .await?
        .into_iter()
        .map(Project::from)
        .collect();

    let outcome = AllocationEngine::allocate(&mut donation, &mut pool, now)?;
    log_pass(donation.id, &outcome);

    if outcome.is_empty() {
        return Ok(donation.into());
    }
    for index in outcome.touched() {
        store_project(txn, &pool[index]).await?;
    }
    Ok(store_donation(txn, &donation).await?)
}

fn log_pass(entry_id: i32, outcome: &AllocationOutcome) {
    for transfer in &outcome.transfers {
        debug!(
            pairing = %outcome.pairing,
            entry_id,
            counterpart_index = transfer.counterpart_index,
            amount = transfer.amount,
            counterpart_closed = transfer.counterpart_closed,
            "Transfer"
        );
    }
    info!(
        pairing = %outcome.pairing,
        entry_id,
        transfers = outcome.transfers.len(),
        amount = outcome.total_allocated(),
        closed_counterparts = outcome.closed_counterparts(),
        entry_closed = outcome.entry_closed,
        "Allocation pass completed"
    );
}

async fn store_project(
    txn: &DatabaseTransaction,
    project: &Project,
) -> Result<charity_projects::Model, DbErr> {
    charity_projects::ActiveModel {
        id: Set(project.id),
        invested_amount: Set(project.ledger.allocated),
        fully_invested: Set(project.ledger.closed),
        close_date: Set(project.ledger.closed_at.map(Into::into)),
        ..Default::default()
    }
    .update(txn)
    .await
}

async fn store_donation(
    txn: &DatabaseTransaction,
    donation: &Donation,
) -> Result<donations::Model, DbErr> {
    donations::ActiveModel {
        id: Set(donation.id),
        invested_amount: Set(donation.ledger.allocated),
        fully_invested: Set(donation.ledger.closed),
        close_date: Set(donation.ledger.closed_at.map(Into::into)),
        ..Default::default()
    }
    .update(txn)
    .await
}
