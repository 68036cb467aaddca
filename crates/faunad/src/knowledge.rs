//! Knowledge endpoint client.
//!
//! Single-attempt wrappers around the remote knowledge API: one POST with a
//! bearer credential, bounded by a timeout, no retries. Failures are
//! reported to the caller, which decides how far down the fact cascade to
//! go. Animal fact responses are parsed permissively - the model wraps its
//! JSON in prose often enough that strict decoding would throw away good
//! answers.

use crate::config::Config;
use fauna_common::AnimalFacts;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::info;

/// Per-request timeout. A knowledge round-trip includes model inference,
/// so this is longer than the image endpoints get.
const KNOWLEDGE_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error("No credential configured")]
    NoCredential,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Knowledge endpoint returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Unparsable knowledge payload: {0}")]
    Parse(String),
}

pub struct KnowledgeQueryClient {
    http: reqwest::Client,
    query_url: String,
    chat_url: String,
    model: String,
    api_key: Option<String>,
    mock_mode: bool,
}

impl KnowledgeQueryClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(KNOWLEDGE_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            query_url: config.knowledge_query_url.clone(),
            chat_url: config.knowledge_chat_url.clone(),
            model: config.knowledge_model.clone(),
            api_key: config.api_key.clone(),
            mock_mode: config.mock_mode,
        }
    }

    /// Send a raw structured query and hand back the endpoint's JSON as-is.
    pub async fn query(&self, query: &str) -> Result<Value, KnowledgeError> {
        if self.mock_mode {
            info!("Mock mode: returning sample query response");
            return Ok(mock_query_response());
        }

        let key = self.credential()?;
        let response = self
            .http
            .post(&self.query_url)
            .bearer_auth(key)
            .json(&json!({ "query": query }))
            .send()
            .await
            .map_err(|e| KnowledgeError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(KnowledgeError::Status { status, body });
        }

        response
            .json()
            .await
            .map_err(|e| KnowledgeError::Network(e.to_string()))
    }

    /// Ask the knowledge endpoint for a fixed-shape factual record about
    /// one animal. Missing fields in an otherwise well-formed answer are
    /// backfilled; anything worse is a Parse error, which the resolver
    /// treats exactly like a transport failure.
    pub async fn animal_facts(&self, name: &str) -> Result<AnimalFacts, KnowledgeError> {
        let key = self.credential()?;
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": facts_prompt(name) }],
            "temperature": 0.3,
            "max_tokens": 500,
        });

        let response = self
            .http
            .post(&self.chat_url)
            .bearer_auth(key)
            .json(&body)
            .send()
            .await
            .map_err(|e| KnowledgeError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(KnowledgeError::Status { status, body });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| KnowledgeError::Network(e.to_string()))?;

        let content = payload
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .ok_or_else(|| KnowledgeError::Parse("no message content".to_string()))?;

        parse_facts(content, name)
    }

    fn credential(&self) -> Result<&str, KnowledgeError> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(KnowledgeError::NoCredential)
    }
}

/// The fixed-shape prompt. Carried from the original service, JSON contract
/// included.
fn facts_prompt(name: &str) -> String {
    format!(
        "Fournissez les informations scientifiques sur {name} au format JSON strict (sans markdown):\n\
         {{\"name\": \"nom français\", \"species\": \"nom scientifique\", \"size\": \"taille\", \"weight\": \"poids\", \"description\": \"courte description 1-2 lignes\"}}\n\
         Répondez UNIQUEMENT avec le JSON, rien d'autre."
    )
}

/// Parse the model's text into facts: extract the first balanced JSON
/// object, probe its fields, backfill what is missing so the record is
/// always complete.
fn parse_facts(text: &str, fallback_name: &str) -> Result<AnimalFacts, KnowledgeError> {
    let fragment = extract_json_object(text)
        .ok_or_else(|| KnowledgeError::Parse("no JSON object in response".to_string()))?;
    let value: Value =
        serde_json::from_str(fragment).map_err(|e| KnowledgeError::Parse(e.to_string()))?;
    if !value.is_object() {
        return Err(KnowledgeError::Parse("response is not an object".to_string()));
    }

    let field = |key: &str, default: &str| {
        value
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| default.to_string())
    };

    Ok(AnimalFacts {
        name: field("name", fallback_name.trim()),
        species: field("species", "Espèce inconnue"),
        size: field("size", "Inconnue"),
        weight: field("weight", "Inconnue"),
        description: field("description", "Description indisponible."),
    })
}

/// Extract the first balanced `{...}` fragment from prose, respecting
/// string literals and escapes. Returns None when no object closes.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Fixed sample payload for offline demonstration.
fn mock_query_response() -> Value {
    json!({
        "mock": true,
        "note": "Réponse factice car appel externe impossible depuis cet environnement",
        "results": [
            { "_id": "mock1", "title": "Article exemple", "body": "Contenu factice pour la preview" }
        ]
    })
}
