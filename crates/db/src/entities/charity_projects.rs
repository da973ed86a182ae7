//! `SeaORM` Entity for charity_projects table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use qrkot_core::ledger::{LedgerFields, Project};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "charity_projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub full_amount: i64,
    pub invested_amount: i64,
    pub fully_invested: bool,
    pub create_date: DateTimeWithTimeZone,
    pub close_date: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Project {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
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

impl From<Project> for Model {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            name: project.name,
            description: project.description,
            full_amount: project.ledger.capacity,
            invested_amount: project.ledger.allocated,
            fully_invested: project.ledger.closed,
            create_date: project.ledger.created_at.into(),
            close_date: project.ledger.closed_at.map(Into::into),
        }
    }
}
