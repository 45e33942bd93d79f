//! Prompt Templates for Problem Breakdown
//!
//! The breakdown call sends a fixed system instruction and the caller's
//! problem text verbatim as the user turn.

use serde_json::{json, Value};

/// System instruction sent with every breakdown call
pub const SYSTEM_PROMPT: &str =
    "Break down complex problems into clear, actionable steps with dependencies.";

/// Template for the breakdown conversation
pub struct BreakdownPromptTemplate;

impl BreakdownPromptTemplate {
    /// Build the chat messages for a breakdown request
    pub fn build_messages(problem: &str) -> Value {
        json!([
            {
                "role": "system",
                "content": SYSTEM_PROMPT
            },
            {
                "role": "user",
                "content": problem
            }
        ])
    }
}
