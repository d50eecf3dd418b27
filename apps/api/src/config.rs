use anyhow::{Context, Result};

const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
// Scanned and image-heavy resumes routinely exceed axum's 2 MiB default.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_api_url: String,
    pub openai_model: String,
    pub hugging_face_api_key: String,
    pub hugging_face_model_api_endpoint: String,
    pub hugging_face_max_new_tokens: u32,
    pub llm_timeout_secs: u64,
    pub max_resume_pages: usize,
    /// Upper bound on a multipart request body, in bytes.
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_api_url: optional_env("OPENAI_API_URL", DEFAULT_OPENAI_API_URL),
            openai_model: optional_env("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            hugging_face_api_key: require_env("HUGGING_FACE_API_KEY")?,
            hugging_face_model_api_endpoint: require_env("HUGGING_FACE_MODEL_API_ENDPOINT")?,
            hugging_face_max_new_tokens: parse_env("HUGGING_FACE_MAX_NEW_TOKENS", 512)?,
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 120)?,
            max_resume_pages: parse_env("MAX_RESUME_PAGES", 3)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            port: parse_env("PORT", 8080)?,
            rust_log: optional_env("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_falls_back_to_default_when_unset() {
        let value: u16 = parse_env("RESUME_ANALYZER_TEST_UNSET_PORT", 8080).unwrap();
        assert_eq!(value, 8080);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("RESUME_ANALYZER_TEST_BAD_PAGES", "three");
        let result: Result<usize> = parse_env("RESUME_ANALYZER_TEST_BAD_PAGES", 3);
        assert!(result.is_err());
        std::env::remove_var("RESUME_ANALYZER_TEST_BAD_PAGES");
    }

    #[test]
    fn test_require_env_names_missing_key() {
        let err = require_env("RESUME_ANALYZER_TEST_MISSING_KEY").unwrap_err();
        assert!(err.to_string().contains("RESUME_ANALYZER_TEST_MISSING_KEY"));
    }
}
