//! Open-set provider: the ordered pool of entries still accepting money.

use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use crate::entities::{charity_projects, donations};

/// Reads the open counterpart pools.
///
/// Entries come back oldest first with ties broken by id, and are locked for
/// update so concurrent passes on Postgres wait for the current one to
/// commit. The lock clause is ignored by SQLite.
pub struct OpenSet;

impl OpenSet {
    /// Returns every open charity project, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn projects<C: ConnectionTrait>(
        conn: &C,
    ) -> Result<Vec<charity_projects::Model>, DbErr> {
        charity_projects::Entity::find()
            .filter(charity_projects::Column::FullyInvested.eq(false))
            .order_by_asc(charity_projects::Column::CreateDate)
            .order_by_asc(charity_projects::Column::Id)
            .lock_exclusive()
            .all(conn)
            .await
    }

    /// Returns every open donation, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn donations<C: ConnectionTrait>(conn: &C) -> Result<Vec<donations::Model>, DbErr> {
        donations::Entity::find()
            .filter(donations::Column::FullyInvested.eq(false))
            .order_by_asc(donations::Column::CreateDate)
            .order_by_asc(donations::Column::Id)
            .lock_exclusive()
            .all(conn)
            .await
    }
}
