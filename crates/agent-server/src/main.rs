//! knowledge-bot HTTP Server
//!
//! Axum server behind the browser chat: session and chat endpoints plus
//! the compiled WASM frontend from `static/`.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_core::{DEFAULT_MODEL, LlmProvider, ToolRegistry};
use agent_runtime::GroqProvider;
use knowledge_tools::{BotProfile, DuckDuckGoClient, WikipediaClient};

use crate::handlers::{
    chat_handler, clear_session, create_session, delete_session, get_session, health_check,
};
use crate::state::AppState;

/// Build the application router
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health & info
        .route("/health", get(health_check))
        // Sessions
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/{id}", get(get_session).delete(delete_session))
        .route("/api/sessions/{id}/clear", post(clear_session))
        // Agent API
        .route("/api/chat", post(chat_handler))
        // Static files (WASM frontend)
        .fallback_service(ServeDir::new("static"))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let model = std::env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
    let profile = BotProfile::Browser;
    let agent_config = profile.agent_config(model);
    agent_config.generation.validate()?;

    // Lookup backends
    let tools: Arc<ToolRegistry> = Arc::new(profile.build_tools(
        Arc::new(DuckDuckGoClient::new()?),
        Arc::new(WikipediaClient::new()?),
    ));

    tracing::info!("Registered {} tools:", tools.len());
    for name in tools.names() {
        tracing::info!("  • {}", name);
    }

    let state = match GroqProvider::from_env() {
        Ok(provider) => {
            let provider: Arc<dyn LlmProvider> = Arc::new(provider);

            // Verify Groq connection
            match provider.health_check().await {
                Ok(true) => {
                    tracing::info!("✓ Connected to Groq");
                    if let Ok(models) = provider.list_models().await {
                        tracing::debug!("{} models available", models.len());
                    }
                }
                Ok(false) | Err(_) => {
                    tracing::warn!("⚠ Groq not reachable - answers will fail until it is");
                }
            }

            AppState::new(provider, tools, agent_config)
        }
        Err(e) => {
            tracing::warn!("⚠ {}", e);
            tracing::warn!("  Get a free key at https://console.groq.com/ and set GROQ_API_KEY in .env");
            AppState::unconfigured(e.to_string(), tools, agent_config)
        }
    };

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 knowledge-bot server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                   - Health check");
    tracing::info!("  POST /api/sessions             - Start a conversation");
    tracing::info!("  GET  /api/sessions/{{id}}        - Transcript");
    tracing::info!("  DELETE /api/sessions/{{id}}      - End conversation");
    tracing::info!("  POST /api/sessions/{{id}}/clear  - Clear conversation");
    tracing::info!("  POST /api/chat                 - Send message");
    tracing::info!("");

    axum::serve(listener, router(state)).await?;

    Ok(())
}
