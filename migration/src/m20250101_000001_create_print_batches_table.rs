use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PrintBatches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PrintBatches::BatchId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PrintBatches::MobileNumber).string_len(15).not_null())
                    .col(
                        ColumnDef::new(PrintBatches::Status)
                            .string_len(20)
                            .not_null()
                            .default("Waiting"),
                    )
                    .col(ColumnDef::new(PrintBatches::TotalCost).decimal_len(10, 2).not_null())
                    .col(ColumnDef::new(PrintBatches::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // Dashboard filters on status and walks the queue oldest first
        manager
            .create_index(
                Index::create()
                    .name("idx_print_batches_status_created_at")
                    .table(PrintBatches::Table)
                    .col(PrintBatches::Status)
                    .col(PrintBatches::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PrintBatches::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PrintBatches {
    #[sea_orm(iden = "PrintBatches")]
    Table,
    BatchId,
    MobileNumber,
    Status,
    TotalCost,
    CreatedAt,
}
