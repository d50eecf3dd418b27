//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::models::{transcript_to_string, ChatMessage, ExtractionResult};
use crate::documents::pdf::ensure_page_limit;
use crate::documents::{extract_pdf_blocking, MultipartFields};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExperienceRequest {
    pub resume_text: String,
    #[serde(default)]
    pub job_description: String,
    /// Reference date for "present" roles. Defaults to today (UTC).
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct ExperienceResponse {
    /// `null` when either document is missing.
    pub experience: Option<ExtractionResult>,
}

#[derive(Debug, Serialize)]
pub struct ExperienceUploadResponse {
    pub resume_pages: usize,
    pub experience: Option<ExtractionResult>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub resume_text: String,
    pub question: String,
    /// Earlier turns, oldest first. Does not include `question`.
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
    /// `history` with this question and its answer appended.
    pub history: Vec<ChatMessage>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/experience
pub async fn handle_experience(
    State(state): State<AppState>,
    Json(request): Json<ExperienceRequest>,
) -> Result<Json<ExperienceResponse>, AppError> {
    let date = request.date.unwrap_or_else(today);
    let experience = state
        .analyzer
        .analyze(&request.resume_text, &request.job_description, date)
        .await?;

    Ok(Json(ExperienceResponse { experience }))
}

/// POST /api/v1/experience/upload
///
/// Multipart: `resume` (PDF, required), then either `job_description` (text)
/// or `job_description_pdf` (PDF), and an optional `date` (YYYY-MM-DD).
/// Text takes precedence when both job description fields are sent.
pub async fn handle_experience_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExperienceUploadResponse>, AppError> {
    let fields = MultipartFields::collect(multipart).await?;

    let resume_bytes = fields
        .bytes("resume")
        .ok_or_else(|| AppError::Validation("Missing resume PDF field 'resume'".to_string()))?;
    let date = match fields.text("date")? {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|_| AppError::Validation(format!("date must be YYYY-MM-DD, got '{raw}'")))?,
        None => today(),
    };

    let resume = extract_pdf_blocking(resume_bytes).await?;
    ensure_page_limit(&resume, state.config.max_resume_pages)?;

    let job_description = match fields.text("job_description")? {
        Some(text) => Some(text),
        None => match fields.bytes("job_description_pdf") {
            Some(bytes) => Some(extract_pdf_blocking(bytes).await?.text),
            None => None,
        },
    };

    info!(
        "Experience upload: resume {} page(s), job description {}",
        resume.page_count,
        if job_description.is_some() { "present" } else { "missing" }
    );

    let experience = state
        .analyzer
        .analyze(&resume.text, job_description.as_deref().unwrap_or_default(), date)
        .await?;

    Ok(Json(ExperienceUploadResponse {
        resume_pages: resume.page_count,
        experience,
    }))
}

/// POST /api/v1/chat
///
/// Stateless: the client owns the transcript and sends it back each turn.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty; upload a resume before chatting".to_string(),
        ));
    }
    if request.question.trim().is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }

    let chat_history = transcript_to_string(&request.history);
    let answer = state
        .analyzer
        .answer_question(
            &request.resume_text,
            &request.question,
            &chat_history,
            request.job_description.as_deref(),
        )
        .await?;

    let mut history = request.history;
    history.push(ChatMessage::user(request.question));
    history.push(ChatMessage::assistant(answer.clone()));

    Ok(Json(ChatResponse { answer, history }))
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
