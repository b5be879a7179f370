//! Migration: Create the reach_outs table owned by accounts.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_accounts_table::Accounts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReachOuts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReachOuts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ReachOuts::AccountId).uuid().not_null())
                    .col(ColumnDef::new(ReachOuts::Name).string().not_null())
                    .col(ColumnDef::new(ReachOuts::Phone).string().not_null())
                    .col(ColumnDef::new(ReachOuts::Description).text().not_null())
                    .col(
                        ColumnDef::new(ReachOuts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reach_outs_account")
                            .from(ReachOuts::Table, ReachOuts::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reach_outs_account_id")
                    .table(ReachOuts::Table)
                    .col(ReachOuts::AccountId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReachOuts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ReachOuts {
    Table,
    Id,
    AccountId,
    Name,
    Phone,
    Description,
    CreatedAt,
}
