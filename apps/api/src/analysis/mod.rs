// Resume analysis: experience extraction and question answering.
// All model calls go through llm_client; this module only builds prompts and parses replies.

pub mod analyzer;
pub mod handlers;
pub mod models;
pub mod parser;
pub mod prompts;
