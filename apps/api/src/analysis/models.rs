use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder for a duration the model did not produce in parsable form.
pub const NOT_AVAILABLE: &str = "N/A";

/// Substituted for the job description when none has been provided.
pub const DEFAULT_JOB_DESCRIPTION: &str = "Not uploaded yet";

/// Total and job-relevant work experience, as free text ("4 years") or `N/A`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub total_experience: String,
    pub relevant_experience: String,
}

impl ExtractionResult {
    pub fn new(total: impl Into<String>, relevant: impl Into<String>) -> Self {
        Self {
            total_experience: total.into(),
            relevant_experience: relevant.into(),
        }
    }

    pub fn not_available() -> Self {
        Self::new(NOT_AVAILABLE, NOT_AVAILABLE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatRole::User => f.write_str("user"),
            ChatRole::Assistant => f.write_str("assistant"),
        }
    }
}

/// One turn of the conversation transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub message: String,
}

impl ChatMessage {
    pub fn user(message: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            message: message.into(),
        }
    }

    pub fn assistant(message: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            message: message.into(),
        }
    }
}

/// Renders a transcript as `role: message` lines for the QA prompt.
pub fn transcript_to_string(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", m.role, m.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_renders_one_line_per_message() {
        let transcript = vec![ChatMessage::user("hi"), ChatMessage::assistant("hello")];
        assert_eq!(transcript_to_string(&transcript), "user: hi\nassistant: hello");
    }

    #[test]
    fn test_empty_transcript_renders_empty() {
        assert_eq!(transcript_to_string(&[]), "");
    }

    #[test]
    fn test_chat_role_serde_is_lowercase() {
        let json = serde_json::to_string(&ChatMessage::assistant("ok")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","message":"ok"}"#);
        let parsed: ChatMessage =
            serde_json::from_str(r#"{"role":"user","message":"q"}"#).unwrap();
        assert_eq!(parsed, ChatMessage::user("q"));
    }

    #[test]
    fn test_not_available_uses_sentinel_for_both_fields() {
        let result = ExtractionResult::not_available();
        assert_eq!(result.total_experience, "N/A");
        assert_eq!(result.relevant_experience, "N/A");
    }
}
