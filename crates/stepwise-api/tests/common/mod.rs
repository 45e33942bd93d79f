//! Test doubles for handler and router tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use stepwise_api::sink::ResponseSink;
use stepwise_core::{AnalysisError, Analyzer};
use stepwise_types::{Analysis, Step};

/// What the mock analyzer does when called
#[derive(Debug, Clone)]
pub enum MockBehavior {
    Reply(Analysis),
    Fail(String),
    PanicWithMessage(&'static str),
    PanicWithoutMessage,
}

/// Deterministic stand-in for the network-calling analyzer
pub struct MockAnalyzer {
    behavior: MockBehavior,
    calls: AtomicUsize,
    problems: Mutex<Vec<String>>,
}

impl MockAnalyzer {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            problems: Mutex::new(Vec::new()),
        }
    }

    /// Replies with the two-step setup/build breakdown
    pub fn setup_and_build() -> Self {
        Self::new(MockBehavior::Reply(setup_and_build_analysis()))
    }

    pub fn failing(message: &str) -> Self {
        Self::new(MockBehavior::Fail(message.to_string()))
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn problems(&self) -> Vec<String> {
        self.problems.lock().unwrap().clone()
    }
}

#[async_trait]
impl Analyzer for MockAnalyzer {
    async fn analyze(&self, problem: &str) -> stepwise_core::Result<Analysis> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.problems.lock().unwrap().push(problem.to_string());

        match &self.behavior {
            MockBehavior::Reply(analysis) => Ok(analysis.clone()),
            MockBehavior::Fail(message) => Err(AnalysisError::message(message.clone())),
            MockBehavior::PanicWithMessage(message) => panic!("{}", message),
            MockBehavior::PanicWithoutMessage => std::panic::panic_any(42_u8),
        }
    }
}

pub fn setup_and_build_analysis() -> Analysis {
    Analysis::new(
        vec![
            Step::new("step1", "Setup", "Initial setup"),
            Step::new("step2", "Build", "Build project").depends_on("step1"),
        ],
        "Test summary",
    )
}

pub const SETUP_AND_BUILD_DIAGRAM: &str = "flowchart TD\n  step1[\"<b>Setup</b><br/>Initial setup\"]\n  step2[\"<b>Build</b><br/>Build project\"]\n  step1 --> step2\n";

/// Sink that records what the handler wrote
#[derive(Debug, Default)]
pub struct RecordingSink {
    status: Option<StatusCode>,
}

impl ResponseSink for RecordingSink {
    type Output = (StatusCode, Value);

    fn status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    fn json(self, body: Value) -> (StatusCode, Value) {
        (self.status.unwrap_or(StatusCode::OK), body)
    }
}
