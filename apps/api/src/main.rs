mod analysis;
mod config;
mod documents;
mod errors;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::analyzer::ResumeAnalyzer;
use crate::config::Config;
use crate::llm_client::{build_http_client, ChatCompletionBackend, TextGenerationBackend};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analyzer v{}", env!("CARGO_PKG_VERSION"));

    let http = build_http_client(Duration::from_secs(config.llm_timeout_secs))?;

    // Extraction: chat-completion model. QA: hosted text-generation endpoint.
    let extraction = ChatCompletionBackend::new(
        http.clone(),
        config.openai_api_key.clone(),
        &config.openai_api_url,
        config.openai_model.clone(),
    );
    let qa = TextGenerationBackend::new(
        http,
        config.hugging_face_api_key.clone(),
        config.hugging_face_model_api_endpoint.clone(),
        config.hugging_face_max_new_tokens,
    );
    info!(
        "LLM backends initialized (extraction: {}, qa: {})",
        config.openai_model, config.hugging_face_model_api_endpoint
    );

    let analyzer = ResumeAnalyzer::new(Arc::new(extraction), Arc::new(qa));

    let state = AppState {
        analyzer: Arc::new(analyzer),
        config: config.clone(),
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
