mod config;
mod errors;
mod llm_client;
mod models;
mod report;
mod resume_upload;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{LlmClient, TextGenerator};
use crate::report::orchestrator::{GenerationSettings, RetryPolicy};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting MyOi TRANSITION API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client; report generation is unavailable without a key
    let generator: Option<Arc<dyn TextGenerator>> = match &config.anthropic_api_key {
        Some(api_key) => {
            let llm: Arc<dyn TextGenerator> =
                Arc::new(LlmClient::new(api_key.clone(), &config.anthropic_api_url)?);
            info!(
                "LLM client initialized (model: {}, endpoint: {})",
                llm_client::MODEL,
                config.anthropic_api_url
            );
            Some(llm)
        }
        None => {
            warn!("ANTHROPIC_API_KEY is not set; /api/generate will return 500");
            None
        }
    };

    let generation = GenerationSettings {
        timeout: config.generate_timeout,
        retry: RetryPolicy {
            max_retries: config.llm_max_retries,
            ..RetryPolicy::default()
        },
    };
    info!(
        "Report generation: timeout {}s, {} retries per call",
        generation.timeout.as_secs(),
        generation.retry.max_retries
    );

    let state = AppState {
        generator,
        generation,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
