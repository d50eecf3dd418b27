//! Tag-delimited output parsing.
//!
//! The model is asked to wrap its answer in `<tag>...</tag>` pairs. Parsing is
//! strict and reports a [`ParsedOutput::Malformed`] variant; callers that need
//! a plain value degrade it to the sentinel with the `From` conversions below.

use tracing::warn;

use crate::analysis::models::ExtractionResult;

pub const TOTAL_EXPERIENCE_TAG: &str = "total_job_experience";
pub const RELEVANT_EXPERIENCE_TAG: &str = "relevant_job_experience";
pub const OUTPUT_RESPONSE_TAG: &str = "output_response";

/// Returned to the user when the chatbot reply carries no `<output_response>`.
pub const APOLOGY_RESPONSE: &str = "I apologize, I'm currently unable to provide a suitable answer to your question. I am committed to continuous improvement, and I'll strive to enhance my capabilities.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedOutput<T> {
    Parsed(T),
    Malformed { missing_tags: Vec<&'static str> },
}

/// Content of the first `<tag>...</tag>` pair, trimmed.
///
/// The closing tag is searched after the opening one. Either missing yields `None`.
pub fn extract_tag<'a>(raw: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = raw.find(&open)? + open.len();
    let len = raw[start..].find(&close)?;
    Some(raw[start..start + len].trim())
}

pub fn parse_experience(raw: &str) -> ParsedOutput<ExtractionResult> {
    let total = extract_tag(raw, TOTAL_EXPERIENCE_TAG);
    let relevant = extract_tag(raw, RELEVANT_EXPERIENCE_TAG);

    match (total, relevant) {
        (Some(total), Some(relevant)) => ParsedOutput::Parsed(ExtractionResult::new(total, relevant)),
        _ => {
            let missing_tags = [(TOTAL_EXPERIENCE_TAG, total), (RELEVANT_EXPERIENCE_TAG, relevant)]
                .into_iter()
                .filter(|(_, value)| value.is_none())
                .map(|(tag, _)| tag)
                .collect();
            ParsedOutput::Malformed { missing_tags }
        }
    }
}

pub fn parse_answer(raw: &str) -> ParsedOutput<String> {
    match extract_tag(raw, OUTPUT_RESPONSE_TAG) {
        Some(answer) => ParsedOutput::Parsed(answer.to_string()),
        None => ParsedOutput::Malformed {
            missing_tags: vec![OUTPUT_RESPONSE_TAG],
        },
    }
}

impl From<ParsedOutput<ExtractionResult>> for ExtractionResult {
    fn from(parsed: ParsedOutput<ExtractionResult>) -> Self {
        match parsed {
            ParsedOutput::Parsed(result) => result,
            ParsedOutput::Malformed { missing_tags } => {
                warn!("Experience output malformed, missing {:?}; using N/A", missing_tags);
                ExtractionResult::not_available()
            }
        }
    }
}

impl From<ParsedOutput<String>> for String {
    fn from(parsed: ParsedOutput<String>) -> Self {
        match parsed {
            ParsedOutput::Parsed(answer) => answer,
            ParsedOutput::Malformed { missing_tags } => {
                warn!("Chat output malformed, missing {:?}; using apology", missing_tags);
                APOLOGY_RESPONSE.to_string()
            }
        }
    }
}
