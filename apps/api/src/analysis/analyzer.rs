//! ResumeAnalyzer — wires prompt building, model invocation, and parsing.
//!
//! Flow per call: build prompt → one backend call → parse tags → degrade to sentinel.
//!
//! Both backends are injected at construction. The analyzer holds no per-call
//! state and caches nothing, so identical inputs always reach the model again.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::analysis::models::ExtractionResult;
use crate::analysis::parser::{parse_answer, parse_experience};
use crate::analysis::prompts::{
    build_extraction_prompt, build_qa_prompt, ExtractionRequest, QuestionRequest,
};
use crate::llm_client::{LlmBackend, LlmError};

pub struct ResumeAnalyzer {
    extraction: Arc<dyn LlmBackend>,
    qa: Arc<dyn LlmBackend>,
}

impl ResumeAnalyzer {
    pub fn new(extraction: Arc<dyn LlmBackend>, qa: Arc<dyn LlmBackend>) -> Self {
        Self { extraction, qa }
    }

    /// Asks the extraction backend for total and relevant experience.
    ///
    /// Unparsable output becomes `("N/A", "N/A")`. Backend failures propagate.
    pub async fn retrieve_experience(
        &self,
        resume_text: &str,
        job_description_text: &str,
        date: NaiveDate,
    ) -> Result<ExtractionResult, LlmError> {
        let prompt = build_extraction_prompt(&ExtractionRequest {
            resume_text,
            job_description: job_description_text,
            date,
        });

        info!(
            "Extracting experience via {} (resume {} chars, JD {} chars)",
            self.extraction.name(),
            resume_text.len(),
            job_description_text.len()
        );
        let raw = self.extraction.complete(&prompt).await?;

        Ok(parse_experience(&raw).into())
    }

    /// Computes experience only when both documents are present.
    ///
    /// Returns `None` without calling the model if either text is blank, so a
    /// caller never shows a result for inputs it no longer has.
    pub async fn analyze(
        &self,
        resume_text: &str,
        job_description_text: &str,
        date: NaiveDate,
    ) -> Result<Option<ExtractionResult>, LlmError> {
        if resume_text.trim().is_empty() || job_description_text.trim().is_empty() {
            return Ok(None);
        }
        self.retrieve_experience(resume_text, job_description_text, date)
            .await
            .map(Some)
    }

    /// Answers a free-form question about the resume.
    ///
    /// `chat_history_text` is the rendered transcript of earlier turns. A
    /// missing or blank job description is sent as "Not uploaded yet".
    pub async fn answer_question(
        &self,
        resume_text: &str,
        question: &str,
        chat_history_text: &str,
        job_description_text: Option<&str>,
    ) -> Result<String, LlmError> {
        let prompt = build_qa_prompt(&QuestionRequest {
            resume_text,
            question,
            chat_history: chat_history_text,
            job_description: job_description_text,
        });

        info!("Answering question via {}", self.qa.name());
        let raw = self.qa.complete(&prompt).await?;

        Ok(parse_answer(&raw).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::parser::APOLOGY_RESPONSE;
    use crate::analysis::prompts::{EXTRACTION_SYSTEM, QA_SYSTEM};
    use crate::llm_client::test_support::RecordingBackend;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn analyzer(
        extraction: &Arc<RecordingBackend>,
        qa: &Arc<RecordingBackend>,
    ) -> ResumeAnalyzer {
        ResumeAnalyzer::new(extraction.clone(), qa.clone())
    }

    #[tokio::test]
    async fn test_retrieve_experience_end_to_end() {
        let extraction = Arc::new(RecordingBackend::replying(
            "<analysis>Acme, five years</analysis>\
             <total_job_experience>5 years</total_job_experience>\
             <relevant_job_experience>5 years</relevant_job_experience>",
        ));
        let qa = Arc::new(RecordingBackend::replying(""));
        let analyzer = analyzer(&extraction, &qa);

        let result = analyzer
            .retrieve_experience("5 years at Acme as engineer", "Senior engineer", date())
            .await
            .unwrap();

        assert_eq!(result, ExtractionResult::new("5 years", "5 years"));
        assert_eq!(extraction.calls(), 1);
        assert_eq!(qa.calls(), 0);

        let prompt = extraction.last_prompt();
        assert_eq!(prompt.system, EXTRACTION_SYSTEM);
        assert!(prompt.human.contains("5 years at Acme as engineer"));
        assert!(prompt.human.contains("Senior engineer"));
        assert!(prompt.human.contains("2024-01-01"));
    }

    #[tokio::test]
    async fn test_untagged_output_yields_not_available() {
        let extraction = Arc::new(RecordingBackend::replying("The candidate worked a while."));
        let qa = Arc::new(RecordingBackend::replying(""));

        let result = analyzer(&extraction, &qa)
            .retrieve_experience("resume", "jd", date())
            .await
            .unwrap();

        assert_eq!(result, ExtractionResult::new("N/A", "N/A"));
    }

    #[tokio::test]
    async fn test_backend_failure_propagates() {
        let extraction = Arc::new(RecordingBackend::failing(429, "quota exceeded"));
        let qa = Arc::new(RecordingBackend::replying(""));

        let err = analyzer(&extraction, &qa)
            .retrieve_experience("resume", "jd", date())
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::Api { status: 429, .. }));
        assert_eq!(extraction.calls(), 1);
    }

    #[tokio::test]
    async fn test_identical_inputs_call_the_model_each_time() {
        let extraction = Arc::new(RecordingBackend::replying("no tags"));
        let qa = Arc::new(RecordingBackend::replying(""));
        let analyzer = analyzer(&extraction, &qa);

        for _ in 0..2 {
            analyzer.retrieve_experience("r", "j", date()).await.unwrap();
        }
        assert_eq!(extraction.calls(), 2);
    }

    #[tokio::test]
    async fn test_analyze_skips_model_when_job_description_blank() {
        let extraction = Arc::new(RecordingBackend::replying("unused"));
        let qa = Arc::new(RecordingBackend::replying(""));
        let analyzer = analyzer(&extraction, &qa);

        assert_eq!(analyzer.analyze("resume", "  \n", date()).await.unwrap(), None);
        assert_eq!(analyzer.analyze("", "Senior engineer", date()).await.unwrap(), None);
        assert_eq!(extraction.calls(), 0);
    }

    #[tokio::test]
    async fn test_analyze_returns_result_when_both_present() {
        let extraction = Arc::new(RecordingBackend::replying(
            "<total_job_experience>3 years</total_job_experience>\
             <relevant_job_experience>1 year</relevant_job_experience>",
        ));
        let qa = Arc::new(RecordingBackend::replying(""));

        let result = analyzer(&extraction, &qa)
            .analyze("resume", "jd", date())
            .await
            .unwrap();
        assert_eq!(result, Some(ExtractionResult::new("3 years", "1 year")));
    }

    #[tokio::test]
    async fn test_answer_question_uses_qa_backend() {
        let extraction = Arc::new(RecordingBackend::replying(""));
        let qa = Arc::new(RecordingBackend::replying(
            "<analysis>identity question</analysis>\
             <output_response>I am Resume Analyzer, a chatbot for your resume.</output_response>",
        ));

        let answer = analyzer(&extraction, &qa)
            .answer_question(
                "resume",
                "What is your role?",
                "user: hi\nassistant: hello",
                None,
            )
            .await
            .unwrap();

        assert_eq!(answer, "I am Resume Analyzer, a chatbot for your resume.");
        assert_eq!(extraction.calls(), 0);

        let prompt = qa.last_prompt();
        assert_eq!(prompt.system, QA_SYSTEM);
        assert!(prompt.human.contains("What is your role?"));
        assert!(prompt.human.contains("user: hi\nassistant: hello"));
        assert!(prompt.human.contains("Not uploaded yet"));
    }

    #[tokio::test]
    async fn test_answer_without_tag_is_apology() {
        let extraction = Arc::new(RecordingBackend::replying(""));
        let qa = Arc::new(RecordingBackend::replying("Sure! Here you go."));

        let answer = analyzer(&extraction, &qa)
            .answer_question("resume", "q", "", Some("Backend engineer"))
            .await
            .unwrap();

        assert_eq!(answer, APOLOGY_RESPONSE);
        assert!(qa.last_prompt().human.contains("Backend engineer"));
    }
}
