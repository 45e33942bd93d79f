//! Function schema for structured output
//!
//! Declared once per process and reused for every call.

use serde_json::{json, Value};
use std::sync::OnceLock;

/// Name of the function the model is forced to call
pub const ANALYSIS_FUNCTION_NAME: &str = "analyze_problem";

static ANALYSIS_SCHEMA: OnceLock<Value> = OnceLock::new();

/// The `analyze_problem` function declaration
pub fn analysis_schema() -> &'static Value {
    ANALYSIS_SCHEMA.get_or_init(|| {
        json!({
            "name": ANALYSIS_FUNCTION_NAME,
            "parameters": {
                "type": "object",
                "properties": {
                    "steps": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "id": { "type": "string" },
                                "title": { "type": "string" },
                                "description": { "type": "string" },
                                "dependencies": {
                                    "type": "array",
                                    "items": { "type": "string" }
                                }
                            },
                            "required": ["id", "title", "description", "dependencies"]
                        }
                    },
                    "summary": { "type": "string" }
                },
                "required": ["steps", "summary"]
            }
        })
    })
}
