use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PrintFiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PrintFiles::FileId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PrintFiles::BatchId).integer().not_null())
                    .col(ColumnDef::new(PrintFiles::FileNameOriginal).string().not_null())
                    .col(ColumnDef::new(PrintFiles::FilePathSaved).string().not_null())
                    .col(ColumnDef::new(PrintFiles::PageCountOriginal).integer().not_null())
                    .col(ColumnDef::new(PrintFiles::PageRange).string_len(100).not_null())
                    .col(ColumnDef::new(PrintFiles::PageCountFinal).integer().not_null())
                    .col(ColumnDef::new(PrintFiles::Copies).integer().not_null().default(1))
                    .col(ColumnDef::new(PrintFiles::PrintColor).boolean().not_null().default(false))
                    .col(ColumnDef::new(PrintFiles::PrintDuplex).boolean().not_null().default(false))
                    .col(ColumnDef::new(PrintFiles::FileCost).decimal_len(10, 2).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_print_files_batch_id")
                            .from(PrintFiles::Table, PrintFiles::BatchId)
                            .to(PrintBatches::Table, PrintBatches::BatchId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_print_files_batch_id")
                    .table(PrintFiles::Table)
                    .col(PrintFiles::BatchId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PrintFiles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PrintFiles {
    #[sea_orm(iden = "PrintFiles")]
    Table,
    FileId,
    BatchId,
    FileNameOriginal,
    FilePathSaved,
    PageCountOriginal,
    PageRange,
    PageCountFinal,
    Copies,
    PrintColor,
    PrintDuplex,
    FileCost,
}

#[derive(DeriveIden)]
enum PrintBatches {
    #[sea_orm(iden = "PrintBatches")]
    Table,
    BatchId,
}
