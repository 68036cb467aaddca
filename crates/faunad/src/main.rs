//! Fauna Daemon - animal knowledge HTTP service.
//!
//! Answers animal description requests through a multi-source fallback
//! cascade and forwards free-text prompts to a remote completion endpoint.

use anyhow::Result;
use faunad::config::Config;
use faunad::server::{self, AppState};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("faunad v{} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::load();
    if !config.has_credential() {
        warn!("No API credential configured; animal facts will come from the reference table");
    }
    if config.mock_mode {
        warn!("Mock mode enabled; remote calls are short-circuited with sample payloads");
    }

    server::run(AppState::new(config)).await
}
