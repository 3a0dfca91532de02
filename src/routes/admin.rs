use axum::{extract::State, http::StatusCode};
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;

/// Applies pending migrations. Safe to call repeatedly.
#[utoipa::path(
    get,
    path = "/init-db",
    responses(
        (status = 200, description = "Schema created or already current", body = String, content_type = "text/plain"),
        (status = 500, description = "Migration failed", body = String, content_type = "text/plain")
    ),
    tag = "Admin"
)]
pub async fn init_db(State(db): State<DatabaseConnection>) -> (StatusCode, String) {
    match Migrator::up(&db, None).await {
        Ok(()) => {
            tracing::info!("Admin | GET /init-db | res=200");
            (StatusCode::OK, "Database initialized successfully!".to_string())
        }
        Err(e) => {
            tracing::error!("Admin | GET /init-db | res=500 | {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error initializing database: {e}"),
            )
        }
    }
}
