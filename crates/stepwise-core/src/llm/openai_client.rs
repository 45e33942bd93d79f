//! OpenAI Client Implementation
//!
//! Implements the [`Analyzer`] trait against an OpenAI-compatible chat
//! completions endpoint, forcing a call to the `analyze_problem` function
//! and decoding its arguments into an [`Analysis`].

use crate::analyzer::Analyzer;
use crate::config::AnalyzerConfig;
use crate::error::{AnalysisError, Result};
use crate::llm::prompt_templates::BreakdownPromptTemplate;
use crate::llm::schema::{analysis_schema, ANALYSIS_FUNCTION_NAME};
use serde::Deserialize;
use serde_json::{json, Value};
use stepwise_types::Analysis;
use tracing::{debug, error, info, instrument, warn};

/// Chat completion reply, reduced to the fields we read
#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    function_call: Option<FunctionCall>,
}

#[derive(Debug, Deserialize)]
struct FunctionCall {
    arguments: Option<String>,
}

/// Error body returned with a non-success status
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
}

/// Characters of an unparseable error body kept in the message
const ERROR_BODY_PREVIEW_CHARS: usize = 200;

/// Network-calling analyzer
pub struct OpenAiAnalyzer {
    config: AnalyzerConfig,
}

impl OpenAiAnalyzer {
    /// Create a new analyzer
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Initialize with environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(AnalyzerConfig::from_env()?))
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Build the chat completions request body for `problem`
    pub fn build_request_body(&self, problem: &str) -> Value {
        json!({
            "model": self.config.model,
            "messages": BreakdownPromptTemplate::build_messages(problem),
            "functions": [analysis_schema()],
            "function_call": { "name": ANALYSIS_FUNCTION_NAME },
            "temperature": self.config.temperature
        })
    }
}

#[async_trait::async_trait]
impl Analyzer for OpenAiAnalyzer {
    #[instrument(skip(self, problem), fields(model = %self.config.model, problem_len = problem.len()))]
    async fn analyze(&self, problem: &str) -> Result<Analysis> {
        info!("Requesting problem breakdown");

        let request_body = self.build_request_body(problem);
        debug!("Calling {}", self.config.completions_url());

        // Built per call so no connection state is shared between requests
        let client = reqwest::Client::builder().build()?;

        let response = client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send request to upstream: {}", e);
                AnalysisError::Request(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!("Failed to read upstream error body: {}", e);
                    String::new()
                }
            };
            warn!("Upstream returned error status {}", status);
            return Err(AnalysisError::Upstream {
                status: status.as_u16(),
                message: upstream_error_message(status, &body),
            });
        }

        let text = response.text().await.map_err(|e| {
            error!("Failed to read upstream response: {}", e);
            AnalysisError::Request(e)
        })?;
        let completion: ChatCompletion = serde_json::from_str(&text).map_err(|e| {
            error!("Failed to decode upstream response: {}", e);
            AnalysisError::InvalidPayload(e)
        })?;

        let analysis = extract_analysis(completion)?;
        info!(
            steps = analysis.steps.len(),
            edges = analysis.edge_count(),
            "Received problem breakdown"
        );
        Ok(analysis)
    }
}

/// Message for a non-success reply: the provider's `error.message` when the
/// body carries one, otherwise a short preview of the body.
fn upstream_error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(ApiErrorBody {
        error: ApiErrorDetail {
            message: Some(message),
        },
    }) = serde_json::from_str::<ApiErrorBody>(body)
    {
        if !message.is_empty() {
            return message;
        }
    }

    let preview: String = body.trim().chars().take(ERROR_BODY_PREVIEW_CHARS).collect();
    if preview.is_empty() {
        status.canonical_reason().unwrap_or("Unknown error").to_string()
    } else {
        preview
    }
}

fn extract_analysis(completion: ChatCompletion) -> Result<Analysis> {
    let arguments = completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.function_call)
        .and_then(|call| call.arguments)
        .filter(|arguments| !arguments.is_empty())
        .ok_or_else(|| {
            error!("Upstream reply carried no function call arguments");
            AnalysisError::MissingPayload
        })?;

    serde_json::from_str(&arguments).map_err(|e| {
        error!("Invalid analysis payload: {}", e);
        AnalysisError::InvalidPayload(e)
    })
}
