use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Per printed page rates the upload page prices jobs with.
const DEFAULT_PRICING: [(&str, f64); 4] = [
    ("bw_single_sided", 1.00),
    ("bw_double_sided", 0.75),
    ("color_single_sided", 2.50),
    ("color_double_sided", 2.00),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Settings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Settings::SettingKey)
                            .string_len(50)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Settings::SettingValue).decimal_len(10, 2).not_null())
                    .to_owned(),
            )
            .await?;

        let mut seed = Query::insert();
        seed.into_table(Settings::Table)
            .columns([Settings::SettingKey, Settings::SettingValue]);
        for (key, value) in DEFAULT_PRICING {
            seed.values_panic([key.into(), value.into()]);
        }
        manager.exec_stmt(seed).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Settings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Settings {
    #[sea_orm(iden = "Settings")]
    Table,
    SettingKey,
    SettingValue,
}
