//! Analyzer capability
//!
//! Handlers depend on this trait rather than on a concrete client.

use crate::error::Result;
use stepwise_types::Analysis;

/// Turns a free-text problem into a structured step breakdown
#[async_trait::async_trait]
pub trait Analyzer: Send + Sync {
    /// Decompose `problem` into ordered steps plus a summary.
    ///
    /// Fails without returning a partial analysis when the upstream call
    /// fails or carries no structured payload.
    async fn analyze(&self, problem: &str) -> Result<Analysis>;
}

