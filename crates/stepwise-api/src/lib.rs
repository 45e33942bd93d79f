//! Stepwise HTTP API
//!
//! A single analysis endpoint plus a health check, served by axum.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::{header::CONTENT_TYPE, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{any, get},
    Router,
};
use serde_json::Value;
use std::any::Any;
use std::sync::Arc;
use stepwise_core::Analyzer;
use stepwise_types::ErrorResponse;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::error;

pub mod config;
pub mod handlers;
pub mod sink;

use config::{ANALYZE_ROUTE, HEALTH_ROUTE};
use handlers::{handle_analyze, health_check, InboundRequest};
use sink::AxumSink;

/// Message returned when a request fails outside the analysis path
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// API state holding the analyzer shared by all requests
#[derive(Clone)]
pub struct ApiState {
    pub analyzer: Arc<dyn Analyzer>,
}

/// Create API router with all endpoints
pub fn create_router(analyzer: Arc<dyn Analyzer>) -> Router {
    let state = ApiState { analyzer };

    Router::new()
        .route(ANALYZE_ROUTE, any(analyze))
        .route(HEALTH_ROUTE, get(health_check))
        .layer(DefaultBodyLimit::disable())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
}

/// Analysis endpoint
///
/// Accepts every method so that non-POST requests get the JSON 405
/// envelope; OPTIONS is answered with an empty 200. Bodies of any size
/// are accepted, and a body that cannot be read still gets a JSON envelope.
async fn analyze(
    State(state): State<ApiState>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            error!("Failed to read request body: {}", rejection);
            return (
                rejection.status(),
                Json(ErrorResponse::new(rejection.body_text())),
            )
                .into_response();
        }
    };

    let body = match parse_body(&body) {
        Ok(body) => body,
        Err(e) => {
            error!("Failed to parse request body: {}", e);
            return server_error();
        }
    };

    handle_analyze(
        state.analyzer.as_ref(),
        InboundRequest::new(method, body),
        AxumSink::new(),
    )
    .await
}

/// Decode a request body; an empty body reads as `{}`
pub fn parse_body(body: &[u8]) -> serde_json::Result<Value> {
    if body.is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::from_slice(body)
}

fn handle_panic(_payload: Box<dyn Any + Send + 'static>) -> Response {
    error!("Request handler panicked");
    server_error()
}

fn server_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(SERVER_ERROR_MESSAGE)),
    )
        .into_response()
}
