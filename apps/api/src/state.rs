use std::sync::Arc;

use crate::analysis::analyzer::ResumeAnalyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<ResumeAnalyzer>,
    pub config: Config,
}

#[cfg(test)]
pub(crate) fn test_state(
    extraction_reply: &str,
    qa_reply: &str,
) -> (
    AppState,
    Arc<crate::llm_client::test_support::RecordingBackend>,
    Arc<crate::llm_client::test_support::RecordingBackend>,
) {
    use crate::llm_client::test_support::RecordingBackend;

    let extraction = Arc::new(RecordingBackend::replying(extraction_reply));
    let qa = Arc::new(RecordingBackend::replying(qa_reply));
    let config = Config {
        openai_api_key: "sk-test".to_string(),
        openai_api_url: "http://127.0.0.1:9/v1".to_string(),
        openai_model: "gpt-4o".to_string(),
        hugging_face_api_key: "hf-test".to_string(),
        hugging_face_model_api_endpoint: "http://127.0.0.1:9/generate".to_string(),
        hugging_face_max_new_tokens: 512,
        llm_timeout_secs: 5,
        max_resume_pages: 3,
        max_upload_bytes: 20 * 1024 * 1024,
        port: 0,
        rust_log: "debug".to_string(),
    };
    let state = AppState {
        analyzer: Arc::new(ResumeAnalyzer::new(extraction.clone(), qa.clone())),
        config,
    };
    (state, extraction, qa)
}
