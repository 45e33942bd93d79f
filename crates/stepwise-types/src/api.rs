//! API Envelope Types
//!
//! Request/response shapes exchanged with HTTP callers.

use crate::analysis::{Analysis, Step};
use serde::{Deserialize, Serialize};

/// Analysis fields plus the rendered diagram
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisData {
    pub steps: Vec<Step>,
    pub summary: String,
    pub mermaid_diagram: String,
}

impl AnalysisData {
    pub fn new(analysis: Analysis, mermaid_diagram: String) -> Self {
        Self {
            steps: analysis.steps,
            summary: analysis.summary,
            mermaid_diagram,
        }
    }
}

/// Success envelope returned for a completed analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessEnvelope {
    pub success: bool,
    pub data: AnalysisData,
}

impl SuccessEnvelope {
    pub fn new(data: AnalysisData) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Error envelope returned for every failure path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
