use sea_orm_migration::prelude::*;

use super::m20260110_120000_bills::Bills;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Finances::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Finances::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Finances::BillId).integer().not_null())
                    .col(ColumnDef::new(Finances::Timespan).integer().not_null())
                    .col(ColumnDef::new(Finances::Amount).double().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-finances-bill_id")
                            .from(Finances::Table, Finances::BillId)
                            .to(Bills::Table, Bills::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-finances-bill_id")
                    .table(Finances::Table)
                    .col(Finances::BillId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Finances::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(Iden)]
enum Finances {
    Table,
    Id,
    BillId,
    Timespan,
    Amount,
}
