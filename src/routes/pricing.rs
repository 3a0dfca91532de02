use std::collections::BTreeMap;

use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::error::AppError;
use crate::services::orders::OrderRepository;

#[derive(Serialize, utoipa::ToSchema)]
pub struct PricingResponse {
    pub success: bool,
    pub pricing: BTreeMap<String, f64>,
}

#[utoipa::path(
    get,
    path = "/get-pricing",
    responses(
        (status = 200, description = "Price per printed page by setting key", body = PricingResponse),
        (status = 500, description = "Database error")
    ),
    tag = "Pricing"
)]
pub async fn get_pricing(
    State(orders): State<OrderRepository>,
) -> Result<Json<PricingResponse>, AppError> {
    let prices = orders.price_table().await?;
    if prices.is_empty() {
        tracing::warn!("Pricing | GET /get-pricing | no rates configured, run /init-db");
    }

    tracing::debug!("Pricing | GET /get-pricing | keys={} | res=200", prices.len());
    Ok(Json(PricingResponse {
        success: true,
        pricing: prices.to_float_map(),
    }))
}
