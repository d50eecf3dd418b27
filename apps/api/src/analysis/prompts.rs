// All LLM prompt text for the analysis module, plus the builders that fill it.
// Tag names here must stay in sync with analysis::parser.

use chrono::NaiveDate;

use crate::analysis::models::DEFAULT_JOB_DESCRIPTION;
use crate::llm_client::prompts::{fill_template, ChatPrompt};

/// System prompt for experience extraction.
pub const EXTRACTION_SYSTEM: &str = "\
Given a candidate's resume content and a description specific to a job role, your task is to extract and output two things \
based on the work experience (rounded to the nearest half year) mentioned by the candidate in the resume.

1. Total Job Experience of the candidate rounded to the nearest half year.
**[IMPORTANT] Projects and education listed by the candidate aren't considered work experience. Only jobs listed under a Work/Work Experience section are considered.**

2. Relevant Job Experience of the candidate (the candidate's experience tenure that completely matches the given job description) rounded to the nearest half year.
Output N/A if the candidate has no experience matching the job role mentioned.

**Analyze and think within an <analysis> tag before generating output.**

Output Format:
[IMPORTANT] Output the Total Job Experience duration within a <total_job_experience> tag and the Relevant Job Experience duration within a <relevant_job_experience> tag.
[IMPORTANT] Only output the duration within the respective tags; no explanation needed.";

/// Extraction human prompt. Placeholders: `{job_description}`, `{date_today}`, `{resume_content}`.
pub const EXTRACTION_HUMAN_TEMPLATE: &str = "\
Given the inputs as follows
--
<job_description>
{job_description}
</job_description>
--
<date_today>
{date_today}
</date_today>
--
<resume_content>
{resume_content}
</resume_content>

<instructions>
1. Output N/A in both total and relevant work experience if the document content contains no job description.
2. **Always output experience rounded to the nearest half year, e.g. `3 years 11 months` is rounded to `4 years` and `3 years 1 month` is rounded to `3 years`.**
</instructions>";

/// System prompt for the resume chatbot.
pub const QA_SYSTEM: &str = "\
You are a chatbot named `Resume Analyzer`. You are designed to answer questions using the candidate's resume provided.

<steps_for_generating_response>
1. First determine whether the user question is about you (i.e., the chatbot) or is a query about the candidate's resume. For chatbot identity related queries, just answer the question without looking into the resume content.
2. For queries about the candidate's resume, generate a clear, concise and comprehensive response by analyzing the candidate's resume content and the user question within an <analysis> tag before generating the output response.
If the document contains no details regarding the question asked, respond accordingly. You can ask a follow-up question in such cases to get a clearer idea of what the user is actually looking for.
3. Handle introductory and complimentary messages as well.
</steps_for_generating_response>

Analyze the input question and the resume content within an <analysis> tag in the output before generating the response. Generate the answer to the question within an <output_response> tag.";

/// QA human prompt. Placeholders: `{resume_content}`, `{user_question}`, `{chat_history}`, `{job_description}`.
pub const QA_HUMAN_TEMPLATE: &str = "\
Given the inputs as follows
--
<resume_content>
{resume_content}
</resume_content>
--
<user_question>
{user_question}
</user_question>
--
<chat_history>
{chat_history}
</chat_history>
--
<job_description>
{job_description}
</job_description>";

/// Inputs for one experience-extraction call.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionRequest<'a> {
    pub resume_text: &'a str,
    pub job_description: &'a str,
    pub date: NaiveDate,
}

/// Inputs for one question-answering call.
#[derive(Debug, Clone, Copy)]
pub struct QuestionRequest<'a> {
    pub resume_text: &'a str,
    pub question: &'a str,
    pub chat_history: &'a str,
    pub job_description: Option<&'a str>,
}

pub fn build_extraction_prompt(request: &ExtractionRequest<'_>) -> ChatPrompt {
    let date_today = request.date.format("%Y-%m-%d").to_string();
    let human = fill_template(
        EXTRACTION_HUMAN_TEMPLATE,
        &[
            ("job_description", request.job_description),
            ("date_today", &date_today),
            ("resume_content", request.resume_text),
        ],
    );
    ChatPrompt::new(EXTRACTION_SYSTEM, human)
}

pub fn build_qa_prompt(request: &QuestionRequest<'_>) -> ChatPrompt {
    let job_description = request
        .job_description
        .filter(|jd| !jd.trim().is_empty())
        .unwrap_or(DEFAULT_JOB_DESCRIPTION);
    let human = fill_template(
        QA_HUMAN_TEMPLATE,
        &[
            ("resume_content", request.resume_text),
            ("user_question", request.question),
            ("chat_history", request.chat_history),
            ("job_description", job_description),
        ],
    );
    ChatPrompt::new(QA_SYSTEM, human)
}
