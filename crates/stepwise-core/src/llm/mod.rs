//! LLM Integration Module
//!
//! OpenAI-compatible client for the structured breakdown call, plus the
//! fixed prompt and function schema it sends.

pub mod openai_client;
pub mod prompt_templates;
pub mod schema;

// Re-export for convenience
pub use openai_client::OpenAiAnalyzer;
pub use prompt_templates::BreakdownPromptTemplate;
pub use schema::{analysis_schema, ANALYSIS_FUNCTION_NAME};
