use anyhow::{Context, Result};
use std::sync::Arc;
use stepwise_api::config::{ServerConfig, ANALYZE_ROUTE};
use stepwise_api::create_router;
use stepwise_core::OpenAiAnalyzer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "stepwise_api=debug,stepwise_core=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let analyzer = OpenAiAnalyzer::from_env().context("Failed to configure analyzer")?;
    info!(
        "Using model {} at {}",
        analyzer.config().model,
        analyzer.config().base_url
    );

    let app = create_router(Arc::new(analyzer));

    let server_config = ServerConfig::from_env();
    let addr = server_config.bind_address();
    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(
        "API server listening at http://localhost:{}{}",
        server_config.port, ANALYZE_ROUTE
    );
    info!(
        "Try: curl -X POST http://localhost:{}{} -H \"Content-Type: application/json\" -d '{{\"problem\": \"Your problem here\"}}'",
        server_config.port, ANALYZE_ROUTE
    );

    axum::serve(listener, app).await?;
    Ok(())
}
