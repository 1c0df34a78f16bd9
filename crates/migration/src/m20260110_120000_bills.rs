use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bills::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bills::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bills::Title).string().not_null())
                    .col(ColumnDef::new(Bills::Summary).string().not_null())
                    .col(ColumnDef::new(Bills::Code).string().not_null())
                    .col(ColumnDef::new(Bills::Committee).string().not_null())
                    .col(ColumnDef::new(Bills::Published).timestamp().not_null())
                    .col(ColumnDef::new(Bills::CboUrl).string().not_null())
                    .col(ColumnDef::new(Bills::PdfUrl).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-bills-published")
                    .table(Bills::Table)
                    .col(Bills::Published)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bills::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(Iden)]
pub enum Bills {
    Table,
    Id,
    Title,
    Summary,
    Code,
    Committee,
    Published,
    CboUrl,
    PdfUrl,
}
