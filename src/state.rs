//! Shared handles passed to every request through the router state.

use std::sync::Arc;

use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use crate::config::Config;
use crate::services::orders::OrderRepository;
use crate::services::storage::UploadStore;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub orders: OrderRepository,
    pub uploads: UploadStore,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            uploads: UploadStore::new(config.upload_dir.clone()),
            db,
            config: Arc::new(config),
        }
    }
}
