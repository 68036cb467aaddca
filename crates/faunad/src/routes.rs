//! API routes for faunad.
//!
//! Handler contract: /animal masks every upstream failure behind a complete
//! record and only rejects a missing name; /ai and /query surface upstream
//! trouble as a 5xx with the upstream's error text (or a sample payload in
//! mock mode).

use crate::resolver::ResolveError;
use crate::server::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use fauna_common::{
    AnimalRecord, AnimalRequest, CompletionAnswer, HealthResponse, PromptRequest, QueryRequest,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

type AppStateArc = Arc<AppState>;

pub fn animal_routes() -> Router<AppStateArc> {
    Router::new().route("/animal", post(resolve_animal))
}

pub fn ai_routes() -> Router<AppStateArc> {
    Router::new().route("/ai", post(complete_prompt))
}

pub fn query_routes() -> Router<AppStateArc> {
    Router::new().route("/query", post(raw_query))
}

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/health", get(health_check))
}

/// Resolve an animal by name. Always 200 with a complete record, except
/// for a missing/blank name.
async fn resolve_animal(
    State(state): State<AppStateArc>,
    Json(req): Json<AnimalRequest>,
) -> Result<Json<AnimalRecord>, (StatusCode, String)> {
    let name = req.name.as_deref().unwrap_or_default();

    match state.resolver.resolve(name).await {
        Ok(record) => {
            info!("Resolved {} from {}", record.name, record.source);
            Ok(Json(record))
        }
        Err(e @ ResolveError::EmptyName) => Err((StatusCode::BAD_REQUEST, e.to_string())),
    }
}

/// Forward a free-text prompt to the completion endpoint.
async fn complete_prompt(
    State(state): State<AppStateArc>,
    Json(req): Json<PromptRequest>,
) -> Result<Json<CompletionAnswer>, (StatusCode, String)> {
    let prompt = match req.prompt.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        Some(prompt) => prompt,
        None => return Err((StatusCode::BAD_REQUEST, "Missing prompt".to_string())),
    };

    match state.completion.complete(prompt, req.model.as_deref()).await {
        Ok(answer) => Ok(Json(answer)),
        Err(e) => {
            error!("Completion request failed: {}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

/// Raw knowledge query passthrough.
async fn raw_query(
    State(state): State<AppStateArc>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let query = match req.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        Some(query) => query,
        None => return Err((StatusCode::BAD_REQUEST, "Missing query".to_string())),
    };

    match state.knowledge.query(query).await {
        Ok(payload) => Ok(Json(payload)),
        Err(e) => {
            error!("Knowledge query failed: {}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}
