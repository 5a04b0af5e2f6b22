//! finance-agent HTTP Server
//!
//! Axum-based server exposing the tool-calling orchestrator over REST.
//! 
//! Data comes from the mock provider until a live
//! `FinancialDataProvider` is wired in.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{routing::{get, post}, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_core::{LlmProvider, OrchestratorBuilder};
use agent_runtime::OllamaProvider;
use finance_advisor::{
    DEFAULT_LANGUAGE, FinancialDataProvider, MockDataProvider, financial_assistant_prompt,
    tools::FinancialLookupTool,
};

use crate::handlers::{chat_handler, health_check};
use crate::state::AppState;

fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/chat", post(chat_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Initialize LLM provider
    let provider: Arc<dyn LlmProvider> = Arc::new(OllamaProvider::from_env()?);
    
    // Verify Ollama connection
    match provider.health_check().await {
        Ok(true) => tracing::info!("✓ Connected to Ollama (model: {})", provider.model()),
        Ok(false) | Err(_) => {
            tracing::warn!("⚠ Ollama not available - chat requests will return a warning");
            tracing::warn!("  Make sure Ollama is running: ollama serve");
        }
    }

    let data: Arc<dyn FinancialDataProvider> = Arc::new(MockDataProvider::new());
    tracing::info!("Data provider: {}", data.name());

    let language = std::env::var("ASSISTANT_LANGUAGE").unwrap_or_else(|_| DEFAULT_LANGUAGE.into());
    let orchestrator = OrchestratorBuilder::new()
        .provider(provider.clone())
        .tool(Arc::new(FinancialLookupTool::new(data)))
        .system_prompt(financial_assistant_prompt(&language))
        .build()?;

    let state = AppState {
        provider,
        orchestrator: Arc::new(orchestrator),
    };

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    
    tracing::info!("🚀 finance-agent server running on http://{}", addr);
    tracing::info!("  GET  /health    - Health check");
    tracing::info!("  POST /api/chat  - Send message");
    
    axum::serve(listener, router(state)).await?;
    
    Ok(())
}
