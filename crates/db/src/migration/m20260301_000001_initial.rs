//! Initial schema: charity projects and donations.
//!
//! Both tables carry the same ledger columns. The check constraints mirror the
//! ledger invariants so a broken write-back fails at commit time.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CharityProjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CharityProjects::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CharityProjects::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(CharityProjects::Description)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CharityProjects::FullAmount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CharityProjects::InvestedAmount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CharityProjects::FullyInvested)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(CharityProjects::CreateDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CharityProjects::CloseDate).timestamp_with_time_zone())
                    .check(Expr::col(CharityProjects::FullAmount).gt(0))
                    .check(Expr::col(CharityProjects::InvestedAmount).gte(0))
                    .check(
                        Expr::col(CharityProjects::FullAmount)
                            .gte(Expr::col(CharityProjects::InvestedAmount)),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_charity_projects_open")
                    .table(CharityProjects::Table)
                    .col(CharityProjects::FullyInvested)
                    .col(CharityProjects::CreateDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Donations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Donations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Donations::UserId).uuid().not_null())
                    .col(ColumnDef::new(Donations::Comment).text())
                    .col(
                        ColumnDef::new(Donations::FullAmount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Donations::InvestedAmount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Donations::FullyInvested)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Donations::CreateDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Donations::CloseDate).timestamp_with_time_zone())
                    .check(Expr::col(Donations::FullAmount).gt(0))
                    .check(Expr::col(Donations::InvestedAmount).gte(0))
                    .check(Expr::col(Donations::FullAmount).gte(Expr::col(Donations::InvestedAmount)))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_donations_open")
                    .table(Donations::Table)
                    .col(Donations::FullyInvested)
                    .col(Donations::CreateDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_donations_user")
                    .table(Donations::Table)
                    .col(Donations::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Donations::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(CharityProjects::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum CharityProjects {
    Table,
    Id,
    Name,
    Description,
    FullAmount,
    InvestedAmount,
    FullyInvested,
    CreateDate,
    CloseDate,
}

#[derive(DeriveIden)]
enum Donations {
    Table,
    Id,
    UserId,
    Comment,
    FullAmount,
    InvestedAmount,
    FullyInvested,
    CreateDate,
    CloseDate,
}
