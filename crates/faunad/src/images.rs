//! Image resolution cascade.
//!
//! Tries, in order: a dedicated per-species image endpoint, a media
//! repository search driven by a curated phrase, and finally the synthetic
//! badge. Every network tier absorbs its own transport, status and parse
//! errors and reports "no result"; the badge tier cannot fail, which makes
//! `resolve` total by construction rather than by exception suppression.

use crate::badge;
use crate::config::Config;
use fauna_common::{ImageRef, SpeciesKey};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Hosts accepted from media search results. A resolved file URL anywhere
/// else is discarded, so a redirecting search hit cannot smuggle in an
/// unrelated target.
const ACCEPTED_MEDIA_DOMAINS: &[&str] = &["wikimedia.org", "wikipedia.org"];

/// Filename extensions accepted from media search results.
const ACCEPTED_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png"];

/// How many search hits to scan for a usable file.
const SEARCH_SCAN_LIMIT: usize = 5;

/// Per-request timeout for the image endpoints.
const IMAGE_TIMEOUT_SECS: u64 = 10;

/// Image provider errors. These never leave this module: every tier maps
/// them to "advance to the next tier".
#[derive(Debug, thiserror::Error)]
pub enum ImageSourceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected status: {0}")]
    Status(reqwest::StatusCode),

    #[error("Unexpected payload shape")]
    Shape,
}

/// Species with a dedicated single-purpose image endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DedicatedProvider {
    Feline,
    Canine,
}

/// Exact key lookup, not substring matching: "chaton" gets no dedicated
/// provider even though it contains "chat".
fn dedicated_provider(key: &SpeciesKey) -> Option<DedicatedProvider> {
    match key.as_str() {
        "chat" => Some(DedicatedProvider::Feline),
        "chien" => Some(DedicatedProvider::Canine),
        _ => None,
    }
}

/// Curated search phrases for known species: binomial name plus the common
/// name, which ranks far better on the media repository than the bare
/// caller-supplied word.
fn search_phrase(key: &SpeciesKey) -> Option<&'static str> {
    match key.as_str() {
        "chat" => Some("Felis catus chat domestique"),
        "chien" => Some("Canis familiaris chien"),
        "lion" => Some("Panthera leo lion"),
        "elephant" | "éléphant" => Some("Loxodonta africana éléphant"),
        "tigre" => Some("Panthera tigris tigre"),
        "ours" => Some("Ursus arctos ours brun"),
        "girafe" => Some("Giraffa camelopardalis girafe"),
        "zebre" | "zèbre" => Some("Equus quagga zèbre"),
        "hippopotame" => Some("Hippopotamus amphibius hippopotame"),
        "crocodile" => Some("Crocodylus niloticus crocodile"),
        "singe" => Some("Primates singe"),
        "leopard" | "léopard" => Some("Panthera pardus léopard"),
        "panthere" | "panthère" => Some("Panthera pardus panthère noire"),
        "rhinoceros" | "rhinocéros" => Some("Rhinocerotidae rhinocéros"),
        "antilope" => Some("Bovidae antilope"),
        "buffle" => Some("Syncerus caffer buffle"),
        "hyene" | "hyène" => Some("Crocuta crocuta hyène"),
        "autruche" => Some("Struthio camelus autruche"),
        "serpent" => Some("Serpentes serpent"),
        "python" => Some("Pythonidae python"),
        _ => None,
    }
}

/// Image source router with its own HTTP client. Endpoint locations come
/// from the configuration so tests can stand in for every provider.
pub struct ImageSourceRouter {
    http: reqwest::Client,
    cat_api_url: String,
    dog_api_url: String,
    media_api_url: String,
    mock_mode: bool,
}

impl ImageSourceRouter {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(IMAGE_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            cat_api_url: config.cat_api_url.clone(),
            dog_api_url: config.dog_api_url.clone(),
            media_api_url: config.media_api_url.clone(),
            mock_mode: config.mock_mode,
        }
    }

    /// Resolve an image for `display_name`. Total function: always returns
    /// a usable reference.
    pub async fn resolve(&self, display_name: &str) -> ImageRef {
        if self.mock_mode {
            debug!("Mock mode: skipping image providers for {}", display_name);
            return badge::generate(display_name);
        }

        let key = SpeciesKey::new(display_name);

        if let Some(provider) = dedicated_provider(&key) {
            if let Some(url) = self.try_dedicated(provider).await {
                return ImageRef { url };
            }
        }

        let phrase = match search_phrase(&key) {
            Some(phrase) => phrase.to_string(),
            None => display_name.trim().to_string(),
        };
        if let Some(url) = self.try_media_search(&phrase).await {
            return ImageRef { url };
        }

        debug!("No image provider answered for {}, using badge", display_name);
        badge::generate(display_name)
    }

    async fn try_dedicated(&self, provider: DedicatedProvider) -> Option<String> {
        let result = match provider {
            DedicatedProvider::Feline => self.fetch_cat_image().await,
            DedicatedProvider::Canine => self.fetch_dog_image().await,
        };

        match result {
            Ok(url) if is_http_url(&url) => Some(url),
            Ok(url) => {
                warn!("Dedicated provider returned a malformed url: {}", url);
                None
            }
            Err(e) => {
                warn!("Dedicated image provider failed: {}", e);
                None
            }
        }
    }

    /// Feline endpoint payload: `[{"url": "..."}]`.
    async fn fetch_cat_image(&self) -> Result<String, ImageSourceError> {
        let payload = self.get_json(&self.cat_api_url, &[]).await?;
        payload
            .pointer("/0/url")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(ImageSourceError::Shape)
    }

    /// Canine endpoint payload: `{"message": "...", "status": "success"}`.
    async fn fetch_dog_image(&self) -> Result<String, ImageSourceError> {
        let payload = self.get_json(&self.dog_api_url, &[]).await?;
        payload
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(ImageSourceError::Shape)
    }

    async fn try_media_search(&self, phrase: &str) -> Option<String> {
        match self.media_search(phrase).await {
            Ok(Some(url)) => Some(url),
            Ok(None) => {
                debug!("Media search produced no usable file for {}", phrase);
                None
            }
            Err(e) => {
                warn!("Media search failed for {}: {}", phrase, e);
                None
            }
        }
    }

    /// Search the media repository for `phrase`, scan the top hits for an
    /// accepted image filename, and resolve the first one whose direct URL
    /// lands on an accepted host.
    async fn media_search(&self, phrase: &str) -> Result<Option<String>, ImageSourceError> {
        let payload = self
            .get_json(
                &self.media_api_url,
                &[
                    ("action", "query"),
                    ("format", "json"),
                    ("list", "search"),
                    ("srsearch", phrase),
                    ("srnamespace", "6"),
                    ("srlimit", "10"),
                    ("srsort", "relevance"),
                ],
            )
            .await?;

        let hits = match payload.pointer("/query/search").and_then(Value::as_array) {
            Some(hits) => hits,
            None => return Ok(None),
        };

        for hit in hits.iter().take(SEARCH_SCAN_LIMIT) {
            let title = match hit.get("title").and_then(Value::as_str) {
                Some(title) => title,
                None => continue,
            };
            if !has_accepted_extension(title) {
                continue;
            }

            match self.resolve_file_url(title).await {
                Ok(Some(url)) if is_accepted_domain(&url) => return Ok(Some(url)),
                Ok(Some(url)) => {
                    debug!("Discarding off-domain media url: {}", url);
                }
                Ok(None) => {}
                Err(e) => {
                    debug!("File lookup failed for {}: {}", title, e);
                }
            }
        }

        Ok(None)
    }

    /// Second lookup: resolve a file title to its direct resource URL.
    async fn resolve_file_url(&self, title: &str) -> Result<Option<String>, ImageSourceError> {
        let payload = self
            .get_json(
                &self.media_api_url,
                &[
                    ("action", "query"),
                    ("format", "json"),
                    ("titles", title),
                    ("prop", "imageinfo"),
                    ("iiprop", "url"),
                ],
            )
            .await?;

        let pages = match payload.pointer("/query/pages").and_then(Value::as_object) {
            Some(pages) => pages,
            None => return Ok(None),
        };

        for page in pages.values() {
            if let Some(url) = page.pointer("/imageinfo/0/url").and_then(Value::as_str) {
                return Ok(Some(url.to_string()));
            }
        }

        Ok(None)
    }

    async fn get_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<Value, ImageSourceError> {
        let mut request = self.http.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ImageSourceError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ImageSourceError::Status(response.status()));
        }

        response
            .json()
            .await
            .map_err(|e| ImageSourceError::Network(e.to_string()))
    }
}

fn is_http_url(url: &str) -> bool {
    match reqwest::Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

fn has_accepted_extension(title: &str) -> bool {
    let lower = title.to_lowercase();
    ACCEPTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Parsed-host comparison, not substring matching: the host must be an
/// accepted domain or a subdomain of one.
fn is_accepted_domain(url: &str) -> bool {
    let parsed = match reqwest::Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => return false,
    };
    let host = match parsed.host_str() {
        Some(host) => host,
        None => return false,
    };

    ACCEPTED_MEDIA_DOMAINS
        .iter()
        .any(|domain| host == *domain || host.ends_with(&format!(".{}", domain)))
}
