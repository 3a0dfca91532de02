use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::task::JoinError;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("{0}")]
    Parse(String),
    #[error("document has no pages")]
    NoPages,
    #[error("page counting task failed: {0}")]
    Task(String),
}

/// Opens the PDF at `path` and counts its pages.
pub fn page_count(path: &Path) -> Result<usize, PdfError> {
    let doc = lopdf::Document::load(path).map_err(|e| PdfError::Parse(e.to_string()))?;

    match doc.get_pages().len() {
        0 => Err(PdfError::NoPages),
        pages => Ok(pages),
    }
}

/// [`page_count`] on the blocking pool so parsing never stalls the runtime.
pub async fn page_count_blocking(path: PathBuf) -> Result<usize, PdfError> {
    tokio::task::spawn_blocking(move || page_count(&path))
        .await
        .map_err(join_error)?
}

/// A panic while parsing means lopdf choked on the document.
fn join_error(err: JoinError) -> PdfError {
    if err.is_panic() {
        PdfError::Parse("document could not be parsed".to_string())
    } else {
        PdfError::Task(err.to_string())
    }
}
