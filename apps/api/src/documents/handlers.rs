//! Axum route handlers for document intake.

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::info;

use crate::documents::pdf::{ensure_page_limit, PdfDocument};
use crate::documents::{extract_pdf_blocking, MultipartFields};
use crate::errors::AppError;
use crate::state::AppState;

/// What an uploaded PDF is. Only resumes are page-limited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Resume,
    JobDescription,
}

impl DocumentKind {
    fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        match raw {
            None | Some("resume") => Ok(DocumentKind::Resume),
            Some("job_description") => Ok(DocumentKind::JobDescription),
            Some(other) => Err(AppError::Validation(format!(
                "Unknown document kind '{other}' (expected 'resume' or 'job_description')"
            ))),
        }
    }
}

/// POST /api/v1/documents/extract
///
/// Multipart: `file` (PDF, required), `kind` (`resume` | `job_description`, default `resume`).
/// Returns the page count and extracted text.
pub async fn handle_extract_document(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<PdfDocument>, AppError> {
    let fields = MultipartFields::collect(multipart).await?;
    let kind = DocumentKind::parse(fields.text("kind")?.as_deref().map(str::trim))?;
    let bytes = fields
        .bytes("file")
        .ok_or_else(|| AppError::Validation("Missing PDF file field 'file'".to_string()))?;

    let document = extract_pdf_blocking(bytes).await?;
    if kind == DocumentKind::Resume {
        ensure_page_limit(&document, state.config.max_resume_pages)?;
    }

    info!(
        "Extracted {:?} PDF: {} page(s), {} chars",
        kind,
        document.page_count,
        document.text.len()
    );
    Ok(Json(document))
}
