//! Askama templates for the server-rendered pages.
//!
//! - `base.html` - shared layout and stylesheet
//! - `index.html` - landing page asking for the customer's mobile number
//! - `upload.html` - per-customer upload page; its script prices and submits jobs
//! - `dashboard.html` - operator queue of open batches

use askama::Template;
use askama_web::WebTemplate;

use crate::entities::print_batch::BatchStatus;
use crate::models::orders::ActiveBatch;

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate;

#[derive(Template, WebTemplate)]
#[template(path = "upload.html")]
pub struct UploadTemplate {
    pub mobile_number: String,
    pub max_upload_mb: usize,
}

/// One queue row, preformatted for display.
pub struct DashboardRow {
    pub batch_id: i32,
    pub mobile_number: String,
    pub status: &'static str,
    pub total_cost: String,
    pub created_at: String,
    pub files: String,
}

impl From<ActiveBatch> for DashboardRow {
    fn from(batch: ActiveBatch) -> Self {
        Self {
            batch_id: batch.batch_id,
            status: batch.status.as_str(),
            total_cost: batch.total_cost_display(),
            created_at: batch.created_at_display(),
            files: batch.file_list(),
            mobile_number: batch.mobile_number,
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub jobs: Vec<DashboardRow>,
    pub statuses: [&'static str; 4],
}

impl DashboardTemplate {
    pub fn new(batches: Vec<ActiveBatch>) -> Self {
        Self {
            jobs: batches.into_iter().map(DashboardRow::from).collect(),
            statuses: [
                BatchStatus::Waiting.as_str(),
                BatchStatus::Printing.as_str(),
                BatchStatus::Completed.as_str(),
                BatchStatus::Cancelled.as_str(),
            ],
        }
    }
}
