//! Response sink capability
//!
//! The analysis handler writes its outcome through this trait, so the same
//! logic can be driven by axum or by any other HTTP front end.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;

/// Where a handler writes its single response
///
/// Both operations consume the sink, so a response can be finalized at
/// most once.
pub trait ResponseSink: Sized {
    /// What finalizing the sink produces
    type Output;

    /// Set the status code and keep building
    fn status(self, status: StatusCode) -> Self;

    /// Finalize with a JSON body
    fn json(self, body: Value) -> Self::Output;
}

/// Sink producing an axum [`Response`]
#[derive(Debug, Clone, Copy)]
pub struct AxumSink {
    status: StatusCode,
}

impl AxumSink {
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
        }
    }
}

impl Default for AxumSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseSink for AxumSink {
    type Output = Response;

    fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    fn json(self, body: Value) -> Response {
        (self.status, Json(body)).into_response()
    }
}
