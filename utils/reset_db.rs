use sea_orm::sea_query::{Alias, Table};
use sea_orm::{ConnectionTrait, Database, DbErr};
use std::env;

const DEFAULT_DATABASE_URL: &str = "sqlite://print_shop.db?mode=rwc";

#[tokio::main]
async fn main() -> Result<(), DbErr> {
    dotenvy::dotenv().ok();
    let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

    let db = Database::connect(&database_url).await?;
    let backend = db.get_database_backend();

    // Children first so the foreign key never blocks the drop
    for table in ["PrintFiles", "PrintBatches", "Settings", "seaql_migrations"] {
        let drop = Table::drop().table(Alias::new(table)).if_exists().to_owned();
        db.execute(backend.build(&drop)).await?;
    }

    println!("Database reset successfully");
    Ok(())
}
