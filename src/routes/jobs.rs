use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    response::Json,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::Config;
use crate::entities::print_batch::BatchStatus;
use crate::error::AppError;
use crate::models::orders::NewPrintFile;
use crate::models::settings::PrintOptions;
use crate::services::orders::OrderRepository;
use crate::services::pricing;
use crate::utils::{is_plain_file_name, is_valid_mobile_number};

#[derive(Deserialize, ToSchema)]
pub struct SubmitJobRequest {
    pub mobile_number: Option<String>,
    #[serde(default)]
    pub jobs: Vec<JobRequest>,
}

/// One uploaded file with the options the customer picked for it.
#[derive(Deserialize, ToSchema)]
pub struct JobRequest {
    pub original_name: String,
    pub saved_path: String,
    pub page_count_original: i32,
    #[serde(default)]
    pub page_range: String,
    pub page_count_final: i32,
    pub copies: i32,
    /// "Color" or anything else for black & white.
    pub print_color: String,
    /// "2-Sided" or anything else for single sided.
    pub print_duplex: String,
    #[schema(value_type = f64)]
    pub file_cost: Decimal,
}

// Widths of the PrintFiles text columns
const MAX_NAME_LEN: usize = 255;
const MAX_PAGE_RANGE_LEN: usize = 100;

impl JobRequest {
    fn validate(&self) -> Result<(), String> {
        if self.original_name.chars().count() > MAX_NAME_LEN
            || self.saved_path.chars().count() > MAX_NAME_LEN
        {
            return Err(format!("file names cannot exceed {MAX_NAME_LEN} characters"));
        }
        if self.page_range.chars().count() > MAX_PAGE_RANGE_LEN {
            return Err(format!(
                "{}: page range cannot exceed {MAX_PAGE_RANGE_LEN} characters",
                self.original_name
            ));
        }
        if self.copies < 1 {
            return Err(format!("{}: copies must be at least 1", self.original_name));
        }
        if self.page_count_original < 0 || self.page_count_final < 0 {
            return Err(format!("{}: page counts cannot be negative", self.original_name));
        }
        if self.file_cost < Decimal::ZERO {
            return Err(format!("{}: cost cannot be negative", self.original_name));
        }
        if !pricing::is_storable_cost(self.file_cost) {
            return Err(format!(
                "{}: cost must be at most {} with two decimal places",
                self.original_name,
                pricing::MAX_STORED_COST
            ));
        }
        if !is_plain_file_name(&self.saved_path) {
            return Err(format!("{}: invalid saved path", self.original_name));
        }
        Ok(())
    }

    fn into_new_file(self) -> NewPrintFile {
        let options = PrintOptions::from_selectors(&self.print_color, &self.print_duplex);
        NewPrintFile {
            file_name_original: self.original_name,
            file_path_saved: self.saved_path,
            page_count_original: self.page_count_original,
            page_range: self.page_range,
            page_count_final: self.page_count_final,
            copies: self.copies,
            print_color: options.color,
            print_duplex: options.duplex,
            file_cost: self.file_cost,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct SubmitJobResponse {
    pub success: bool,
    pub batch_id: i32,
    pub total_cost: f64,
}

#[derive(Serialize, ToSchema)]
pub struct StatusUpdateResponse {
    pub success: bool,
}

#[utoipa::path(
    post,
    path = "/submit-job",
    tag = "Orders",
    request_body = SubmitJobRequest,
    responses(
        (status = 200, description = "Batch and files stored", body = SubmitJobResponse),
        (status = 400, description = "Invalid data, mobile number, job entry or cost"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn submit_job(
    State(orders): State<OrderRepository>,
    State(config): State<Arc<Config>>,
    payload: Result<Json<SubmitJobRequest>, JsonRejection>,
) -> Result<Json<SubmitJobResponse>, AppError> {
    let Json(request) = payload.inspect_err(|e| {
        tracing::info!("Orders | POST /submit-job | res=400 | {}", e.body_text());
    })?;

    let mobile_number = match request.mobile_number {
        Some(number) if !number.is_empty() && !request.jobs.is_empty() => number,
        _ => {
            tracing::info!("Orders | POST /submit-job | res=400 | Invalid data");
            return Err(AppError::BadRequest("Invalid data".to_string()));
        }
    };
    if !is_valid_mobile_number(&mobile_number) {
        tracing::info!("Orders | POST /submit-job | res=400 | Invalid mobile number");
        return Err(AppError::BadRequest("Invalid mobile number".to_string()));
    }

    for job in &request.jobs {
        if let Err(reason) = job.validate() {
            tracing::info!("Orders | POST /submit-job | mobile={} | res=400 | {}", mobile_number, reason);
            return Err(AppError::BadRequest(reason));
        }
    }

    let total = pricing::total_cost(request.jobs.iter().map(|job| job.file_cost));
    if !total.is_some_and(pricing::is_storable_cost) {
        tracing::info!("Orders | POST /submit-job | mobile={} | res=400 | total too large", mobile_number);
        return Err(AppError::BadRequest(format!(
            "Order total cannot exceed {}",
            pricing::MAX_STORED_COST
        )));
    }

    let files: Vec<NewPrintFile> = request.jobs.into_iter().map(JobRequest::into_new_file).collect();

    if config.verify_costs {
        let prices = orders.price_table().await?;
        for file in &files {
            if let Err(mismatch) = pricing::verify_file(&prices, file) {
                tracing::info!(
                    "Orders | POST /submit-job | mobile={} | file={} | res=400 | {}",
                    mobile_number,
                    file.file_name_original,
                    mismatch
                );
                return Err(AppError::BadRequest(format!(
                    "{}: {}",
                    file.file_name_original, mismatch
                )));
            }
        }
    }

    let submitted = orders.create_batch(&mobile_number, files).await?;

    tracing::info!(
        "Orders | POST /submit-job | mobile={} | batch={} | files={} | total={} | res=200",
        mobile_number,
        submitted.batch_id,
        submitted.file_count,
        submitted.total_cost
    );
    Ok(Json(SubmitJobResponse {
        success: true,
        batch_id: submitted.batch_id,
        total_cost: submitted.total_cost.to_f64().unwrap_or_default(),
    }))
}

#[utoipa::path(
    post,
    path = "/update-job-status/{batch_id}/{status}",
    tag = "Orders",
    params(
        ("batch_id" = i32, Path, description = "Batch to update"),
        ("status" = BatchStatus, Path, description = "Waiting, Printing, Completed or Cancelled")
    ),
    responses(
        (status = 200, description = "Status overwritten", body = StatusUpdateResponse),
        (status = 400, description = "Invalid status"),
        (status = 404, description = "Batch not found"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn update_job_status(
    State(orders): State<OrderRepository>,
    path: Result<Path<(i32, String)>, PathRejection>,
) -> Result<Json<StatusUpdateResponse>, AppError> {
    let Path((batch_id, status)) = path?;

    let Ok(status) = status.parse::<BatchStatus>() else {
        tracing::info!("Orders | POST /update-job-status | batch={} | status={} | res=400", batch_id, status);
        return Err(AppError::BadRequest("Invalid status".to_string()));
    };

    if !orders.update_status(batch_id, status).await? {
        tracing::info!("Orders | POST /update-job-status | batch={} | res=404", batch_id);
        return Err(AppError::NotFound("Batch not found".to_string()));
    }

    tracing::info!(
        "Orders | POST /update-job-status | batch={} | status={} | res=200",
        batch_id,
        status
    );
    Ok(Json(StatusUpdateResponse { success: true }))
}
