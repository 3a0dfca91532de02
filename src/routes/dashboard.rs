use axum::extract::State;

use crate::error::PageError;
use crate::services::orders::OrderRepository;
use crate::templates::DashboardTemplate;

#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Open batches, oldest first", body = String, content_type = "text/html"),
        (status = 500, description = "Database error", body = String, content_type = "text/plain")
    ),
    tag = "Pages"
)]
pub async fn dashboard(State(orders): State<OrderRepository>) -> Result<DashboardTemplate, PageError> {
    let batches = orders.list_active().await?;

    tracing::info!("Dashboard | GET /dashboard | open={} | res=200", batches.len());
    Ok(DashboardTemplate::new(batches))
}
