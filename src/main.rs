mod config;
mod entities;
mod error;
mod models;
mod routes;
mod services;
mod state;
mod templates;
mod utils;

#[cfg(test)]
mod test_support;

use clap::Parser;
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use routes::create_routes;
use state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = Config::parse();

    // sqlx logs every statement at info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{},tower_http=info,sqlx=warn", config.log_level()))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    let db = Database::connect(&config.database_url).await?;
    info!("Connected to database");

    if config.auto_migrate {
        Migrator::up(&db, None).await?;
        info!("Migrations applied");
    }

    let state = AppState::new(db, config);
    state.uploads.ensure_dir().await?;
    info!("Storing uploads in {}", state.uploads.base_path().display());

    let addr = state.config.bind_addr()?;
    if state.config.verify_costs {
        info!("Server side cost verification enabled");
    }
    let app = create_routes(state);

    info!("Starting server at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
