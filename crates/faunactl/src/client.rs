//! HTTP client for talking to a running faunad.

use anyhow::{anyhow, Context, Result};
use fauna_common::{AnimalRecord, CompletionAnswer, HealthResponse, PromptRequest};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;

const DEFAULT_URL: &str = "http://127.0.0.1:3000";

/// Daemon URL discovery: explicit --url flag, then $FAUNAD_URL, then the
/// default local port.
pub struct DaemonClient {
    http: reqwest::Client,
    base_url: String,
}

impl DaemonClient {
    pub fn new(url: Option<String>) -> Self {
        let base_url = url
            .or_else(|| std::env::var("FAUNAD_URL").ok())
            .unwrap_or_else(|| DEFAULT_URL.to_string());

        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn animal(&self, name: &str) -> Result<AnimalRecord> {
        self.post_json("/animal", &json!({ "name": name })).await
    }

    pub async fn ask(&self, prompt: &str, model: Option<&str>) -> Result<CompletionAnswer> {
        let body = serde_json::to_value(PromptRequest {
            prompt: Some(prompt.to_string()),
            model: model.map(str::to_string),
        })?;
        self.post_json("/ai", &body).await
    }

    pub async fn query(&self, query: &str) -> Result<Value> {
        self.post_json("/query", &json!({ "query": query })).await
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        let url = format!("{}/v1/health", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Daemon unreachable at {}", self.base_url))?;
        response.json().await.context("Invalid response from daemon")
    }

    async fn post_json<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Daemon unreachable at {}", self.base_url))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!("Daemon returned {}: {}", status, text));
        }

        response.json().await.context("Invalid response from daemon")
    }
}
