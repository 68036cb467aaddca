//! HTTP server for faunad.

use crate::completion::PromptCompletionClient;
use crate::config::Config;
use crate::knowledge::KnowledgeQueryClient;
use crate::resolver::AnimalInfoResolver;
use crate::routes;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers. Built once at startup from an
/// immutable configuration; nothing in here is mutated afterwards.
pub struct AppState {
    pub config: Config,
    pub resolver: AnimalInfoResolver,
    pub knowledge: KnowledgeQueryClient,
    pub completion: PromptCompletionClient,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            resolver: AnimalInfoResolver::new(&config),
            knowledge: KnowledgeQueryClient::new(&config),
            completion: PromptCompletionClient::new(&config),
            start_time: Instant::now(),
            config,
        }
    }
}

/// Assemble the router. Exposed separately from `run` so tests can drive
/// it in-process.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::animal_routes())
        .merge(routes::ai_routes())
        .merge(routes::query_routes())
        .merge(routes::health_routes())
        .with_state(Arc::new(state))
        .fallback_service(ServeDir::new("public"))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until the process is stopped.
pub async fn run(state: AppState) -> Result<()> {
    let addr = format!("0.0.0.0:{}", state.config.port);
    let app = app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
