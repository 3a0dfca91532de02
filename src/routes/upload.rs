use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Form, Multipart, State},
    response::{Json, Redirect},
};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{AppError, PageError};
use crate::services::storage::UploadStore;
use crate::templates::UploadTemplate;
use crate::utils::pdf::{self, PdfError};
use crate::utils::{has_pdf_extension, is_valid_mobile_number, sanitize_filename};

#[derive(Deserialize)]
pub struct MobileNumberForm {
    mobile_number: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct FileUploadResponse {
    success: bool,
    original_name: String,
    saved_path: String,
    page_count: usize,
}

/// The upload page needs a mobile number, so a bare GET goes back to the landing page.
pub async fn upload_page() -> Redirect {
    Redirect::to("/")
}

pub async fn upload_form(
    State(config): State<Arc<Config>>,
    Form(form): Form<MobileNumberForm>,
) -> Result<UploadTemplate, PageError> {
    let mobile_number = form.mobile_number.unwrap_or_default();
    if !is_valid_mobile_number(&mobile_number) {
        tracing::info!("Upload | POST /upload | res=400 | Invalid mobile number");
        return Err(AppError::BadRequest("Invalid mobile number".to_string()).into());
    }

    Ok(UploadTemplate {
        mobile_number,
        max_upload_mb: config.max_upload_mb,
    })
}

#[utoipa::path(
    post,
    path = "/upload-file",
    tag = "Uploads",
    request_body(content = Vec<u8>, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "PDF stored and its pages counted", body = FileUploadResponse),
        (status = 400, description = "Missing file, not a PDF, or unreadable PDF"),
        (status = 413, description = "Upload larger than the configured limit"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn upload_file(
    State(uploads): State<UploadStore>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<FileUploadResponse>, AppError> {
    let mut multipart = multipart?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            tracing::info!("Upload | POST /upload-file | res=400 | No file selected");
            return Err(AppError::BadRequest("No file selected".to_string()));
        }
        if !has_pdf_extension(&filename) {
            tracing::info!("Upload | POST /upload-file | file={} | res=400 | Not a PDF", filename);
            return Err(AppError::BadRequest("Only PDF files are allowed".to_string()));
        }

        let data = field.bytes().await?;
        let original_name = sanitize_filename(&filename);
        let saved_path = uploads.save(&original_name, &data).await?;

        let page_count = match pdf::page_count_blocking(uploads.path_of(&saved_path)).await {
            Ok(pages) => pages,
            Err(e) => {
                if let Err(remove_err) = uploads.remove(&saved_path).await {
                    tracing::warn!("Failed to remove rejected upload {}: {}", saved_path, remove_err);
                }
                if let PdfError::Task(_) = e {
                    return Err(AppError::InternalServerError(e.to_string()));
                }
                tracing::info!("Upload | POST /upload-file | file={} | res=400 | {}", original_name, e);
                return Err(AppError::BadRequest(format!("Invalid PDF file: {e}")));
            }
        };

        tracing::info!(
            "Upload | POST /upload-file | file={} | saved={} | pages={} | res=200",
            original_name,
            saved_path,
            page_count
        );
        return Ok(Json(FileUploadResponse {
            success: true,
            original_name,
            saved_path,
            page_count,
        }));
    }

    tracing::info!("Upload | POST /upload-file | res=400 | No file field found");
    Err(AppError::BadRequest("No file provided".to_string()))
}
