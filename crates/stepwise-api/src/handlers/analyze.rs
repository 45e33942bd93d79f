//! Analysis request handling
//!
//! Validates the method and body, runs the analyzer and the renderer, and
//! writes exactly one success or error envelope to the sink.

use crate::sink::ResponseSink;
use axum::http::{Method, StatusCode};
use futures::FutureExt;
use serde_json::Value;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use stepwise_core::{render_mermaid, Analyzer};
use stepwise_types::{AnalysisData, ErrorResponse, SuccessEnvelope};
use tracing::{error, info, instrument, warn};

pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";
pub const PROBLEM_REQUIRED_MESSAGE: &str = "Problem required";
pub const ANALYSIS_FAILED_MESSAGE: &str = "Analysis failed";

/// An inbound analysis request, independent of the HTTP framework
#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub method: Method,
    pub body: Value,
}

impl InboundRequest {
    pub fn new(method: Method, body: Value) -> Self {
        Self { method, body }
    }

    /// A POST request with the given JSON body
    pub fn post(body: Value) -> Self {
        Self::new(Method::POST, body)
    }
}

/// Handle one analysis request
///
/// Only POST is accepted. The body must carry a non-empty string `problem`.
/// Analyzer failures and panics become a 500 error envelope whose message
/// is the failure's own text, or `"Analysis failed"` when it has none.
#[instrument(skip_all, fields(method = %request.method))]
pub async fn handle_analyze<A, S>(analyzer: &A, request: InboundRequest, sink: S) -> S::Output
where
    A: Analyzer + ?Sized,
    S: ResponseSink,
{
    if request.method != Method::POST {
        warn!("Rejecting analysis request with method {}", request.method);
        return reject(sink, StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_MESSAGE);
    }

    let Some(problem) = extract_problem(&request.body) else {
        warn!("Rejecting analysis request without a problem");
        return reject(sink, StatusCode::BAD_REQUEST, PROBLEM_REQUIRED_MESSAGE);
    };

    info!(problem_len = problem.len(), "Analyzing problem");

    match run_analysis(analyzer, problem).await {
        Ok(body) => sink.status(StatusCode::OK).json(body),
        Err(message) => reject(sink, StatusCode::INTERNAL_SERVER_ERROR, &message),
    }
}

/// The `problem` field when it is a non-empty string
pub fn extract_problem(body: &Value) -> Option<&str> {
    body.get("problem")
        .and_then(Value::as_str)
        .filter(|problem| !problem.is_empty())
}

async fn run_analysis<A>(analyzer: &A, problem: &str) -> Result<Value, String>
where
    A: Analyzer + ?Sized,
{
    let outcome = AssertUnwindSafe(async {
        let analysis = analyzer.analyze(problem).await?;
        let mermaid_diagram = render_mermaid(&analysis.steps);
        Ok::<_, stepwise_core::AnalysisError>(SuccessEnvelope::new(AnalysisData::new(
            analysis,
            mermaid_diagram,
        )))
    })
    .catch_unwind()
    .await;

    let envelope = match outcome {
        Ok(Ok(envelope)) => envelope,
        Ok(Err(e)) => {
            error!(upstream = e.is_upstream(), "Analysis failed: {}", e);
            return Err(failure_message(Some(e.to_string())));
        }
        Err(payload) => {
            error!("Analyzer panicked");
            return Err(failure_message(panic_message(payload.as_ref())));
        }
    };

    info!(steps = envelope.data.steps.len(), "Analysis complete");
    serde_json::to_value(&envelope).map_err(|e| {
        error!("Failed to serialize analysis: {}", e);
        failure_message(Some(e.to_string()))
    })
}

fn reject<S: ResponseSink>(sink: S, status: StatusCode, message: &str) -> S::Output {
    let body = serde_json::to_value(ErrorResponse::new(message))
        .unwrap_or_else(|_| serde_json::json!({ "error": message }));
    sink.status(status).json(body)
}

/// Text carried by a panic payload, if it is a string
pub fn panic_message(payload: &(dyn Any + Send)) -> Option<String> {
    payload
        .downcast_ref::<&str>()
        .map(|message| message.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
}

/// The message to show callers, falling back to `"Analysis failed"`
pub fn failure_message(message: Option<String>) -> String {
    message
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| ANALYSIS_FAILED_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_problem() {
        assert_eq!(extract_problem(&json!({ "problem": "Plan" })), Some("Plan"));
        assert_eq!(extract_problem(&json!({ "problem": "  " })), Some("  "));
        assert_eq!(extract_problem(&json!({ "problem": "" })), None);
        assert_eq!(extract_problem(&json!({ "problem": null })), None);
        assert_eq!(extract_problem(&json!({ "problem": 42 })), None);
        assert_eq!(extract_problem(&json!({})), None);
        assert_eq!(extract_problem(&json!([])), None);
    }

    #[test]
    fn test_failure_message_fallback() {
        assert_eq!(failure_message(Some("boom".to_string())), "boom");
        assert_eq!(failure_message(Some(String::new())), ANALYSIS_FAILED_MESSAGE);
        assert_eq!(failure_message(None), ANALYSIS_FAILED_MESSAGE);
    }

    #[test]
    fn test_panic_message_reads_string_payloads() {
        let str_payload: Box<dyn Any + Send> = Box::new("static boom");
        let string_payload: Box<dyn Any + Send> = Box::new("owned boom".to_string());
        let other_payload: Box<dyn Any + Send> = Box::new(7_u32);

        assert_eq!(panic_message(str_payload.as_ref()).as_deref(), Some("static boom"));
        assert_eq!(panic_message(string_payload.as_ref()).as_deref(), Some("owned boom"));
        assert_eq!(panic_message(other_payload.as_ref()), None);
    }
}
