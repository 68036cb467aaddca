//! Prompt completion client.
//!
//! Forwards an arbitrary prompt to the remote responses endpoint and
//! normalizes the variably-shaped payload into a single text answer. The
//! known shapes are modelled as an untagged union tried in order; anything
//! unrecognized keeps the raw payload but yields no text.

use crate::config::Config;
use fauna_common::CompletionAnswer;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::info;

/// Per-request timeout, sized for model inference.
const COMPLETION_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("No credential configured")]
    NoCredential,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Completion endpoint returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Known payload shapes of the completion endpoint, tried in order:
/// a flat text field first, then the nested content-fragment list, and a
/// catch-all for anything else.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CompletionPayload {
    Flat { output_text: String },
    Fragments { output: Vec<OutputItem> },
    Unrecognized(Value),
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<ContentFragment>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContentFragment {
    Typed { text: String },
    Plain(String),
    Other(Value),
}

impl ContentFragment {
    fn text(&self) -> Option<&str> {
        match self {
            ContentFragment::Typed { text } => Some(text),
            ContentFragment::Plain(text) => Some(text),
            ContentFragment::Other(_) => None,
        }
    }
}

pub struct PromptCompletionClient {
    http: reqwest::Client,
    endpoint: String,
    default_model: String,
    api_key: Option<String>,
    mock_mode: bool,
}

impl PromptCompletionClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(COMPLETION_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            endpoint: config.completion_url.clone(),
            default_model: config.completion_model.clone(),
            api_key: config.api_key.clone(),
            mock_mode: config.mock_mode,
        }
    }

    /// One attempt against the completion endpoint. The answer carries the
    /// upstream payload as received plus whatever text could be extracted.
    pub async fn complete(
        &self,
        prompt: &str,
        model: Option<&str>,
    ) -> Result<CompletionAnswer, CompletionError> {
        if self.mock_mode {
            info!("Mock mode: returning sample completion");
            return Ok(mock_answer());
        }

        let key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(CompletionError::NoCredential)?;

        let body = json!({
            "model": model.unwrap_or(&self.default_model),
            "input": prompt,
        });

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status { status, body });
        }

        let raw: Value = response
            .json()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;
        let text = extract_text(&raw);

        Ok(CompletionAnswer { raw, text })
    }
}

/// Normalize the endpoint's payload into plain text: a flat field wins,
/// otherwise every textual fragment in the output list is concatenated.
pub fn extract_text(payload: &Value) -> Option<String> {
    match serde_json::from_value::<CompletionPayload>(payload.clone()) {
        Ok(CompletionPayload::Flat { output_text }) => Some(output_text),
        Ok(CompletionPayload::Fragments { output }) => {
            let parts: Vec<&str> = output
                .iter()
                .flat_map(|item| item.content.iter())
                .filter_map(ContentFragment::text)
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.concat())
            }
        }
        Ok(CompletionPayload::Unrecognized(_)) | Err(_) => None,
    }
}

/// Fixed sample payload for offline demonstration.
fn mock_answer() -> CompletionAnswer {
    let text = "Les modèles rapides permettent des interactions temps réel et réduisent la latence pour les applications.";
    CompletionAnswer {
        raw: json!({ "mock": true, "output_text": text }),
        text: Some(text.to_string()),
    }
}
