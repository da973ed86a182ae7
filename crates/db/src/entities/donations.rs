//! `SeaORM` Entity for donations table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use qrkot_core::ledger::{Donation, LedgerFields};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "donations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: Uuid,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
    pub full_amount: i64,
    pub invested_amount: i64,
    pub fully_invested: bool,
    pub create_date: DateTimeWithTimeZone,
    pub close_date: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Donation {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            comment: model.comment,
            ledger: LedgerFields {
                capacity: model.full_amount,
                allocated: model.invested_amount,
                closed: model.fully_invested,
                created_at: model.create_date.to_utc(),
                closed_at: model.close_date.map(|d| d.to_utc()),
            },
        }
    }
}

impl From<Donation> for Model {
    fn from(donation: Donation) -> Self {
        Self {
            id: donation.id,
            user_id: donation.user_id,
            comment: donation.comment,
            full_amount: donation.ledger.capacity,
            invested_amount: donation.ledger.allocated,
            fully_invested: donation.ledger.closed,
            create_date: donation.ledger.created_at.into(),
            close_date: donation.ledger.closed_at.map(Into::into),
        }
    }
}
