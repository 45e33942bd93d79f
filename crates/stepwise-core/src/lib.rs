//! Stepwise core
//!
//! Breaks a free-text problem into dependent steps through an LLM and
//! renders the result as a Mermaid flowchart.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod llm;
pub mod renderer;

pub use analyzer::Analyzer;
pub use config::AnalyzerConfig;
pub use error::{AnalysisError, Result};
pub use llm::OpenAiAnalyzer;
pub use renderer::render_mermaid;
