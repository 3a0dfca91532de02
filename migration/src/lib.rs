pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_print_batches_table;
mod m20250101_000002_create_print_files_table;
mod m20250101_000003_create_settings_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_print_batches_table::Migration),
            Box::new(m20250101_000002_create_print_files_table::Migration),
            Box::new(m20250101_000003_create_settings_table::Migration),
        ]
    }
}
