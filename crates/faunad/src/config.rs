//! Configuration management for faunad.
//!
//! Loads settings from /etc/fauna/config.toml when present, then applies
//! environment overrides. The resulting value is immutable for the lifetime
//! of the process and handed to each component constructor explicitly; no
//! component reads the environment on its own.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Config file path
pub const CONFIG_PATH: &str = "/etc/fauna/config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Bearer credential for the knowledge and completion endpoints.
    /// When absent, animal facts come from the reference table and the
    /// /ai and /query endpoints report the missing credential.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Short-circuit every remote call with a fixed sample payload.
    /// Useful for offline demonstration of the frontend.
    #[serde(default)]
    pub mock_mode: bool,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Document-store query endpoint backing POST /query.
    #[serde(default = "default_knowledge_query_url")]
    pub knowledge_query_url: String,

    /// Chat-completions endpoint used for animal fact lookups.
    #[serde(default = "default_knowledge_chat_url")]
    pub knowledge_chat_url: String,

    /// Model requested for animal fact lookups.
    #[serde(default = "default_knowledge_model")]
    pub knowledge_model: String,

    /// Responses endpoint backing POST /ai.
    #[serde(default = "default_completion_url")]
    pub completion_url: String,

    /// Model requested by POST /ai when the caller does not name one.
    #[serde(default = "default_completion_model")]
    pub completion_model: String,

    /// Dedicated feline image endpoint.
    #[serde(default = "default_cat_api_url")]
    pub cat_api_url: String,

    /// Dedicated canine image endpoint.
    #[serde(default = "default_dog_api_url")]
    pub dog_api_url: String,

    /// Media repository search/lookup endpoint (MediaWiki api.php).
    #[serde(default = "default_media_api_url")]
    pub media_api_url: String,
}

fn default_port() -> u16 {
    3000
}

fn default_knowledge_query_url() -> String {
    "https://api.groq.ai/v1/query".to_string()
}

fn default_knowledge_chat_url() -> String {
    "https://api.groq.com/openai/v1/chat/completions".to_string()
}

fn default_knowledge_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_completion_url() -> String {
    "https://api.groq.com/openai/v1/responses".to_string()
}

fn default_completion_model() -> String {
    "openai/gpt-oss-20b".to_string()
}

fn default_cat_api_url() -> String {
    "https://api.thecatapi.com/v1/images/search".to_string()
}

fn default_dog_api_url() -> String {
    "https://dog.ceo/api/breeds/image/random".to_string()
}

fn default_media_api_url() -> String {
    "https://commons.wikimedia.org/w/api.php".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            mock_mode: false,
            port: default_port(),
            knowledge_query_url: default_knowledge_query_url(),
            knowledge_chat_url: default_knowledge_chat_url(),
            knowledge_model: default_knowledge_model(),
            completion_url: default_completion_url(),
            completion_model: default_completion_model(),
            cat_api_url: default_cat_api_url(),
            dog_api_url: default_dog_api_url(),
            media_api_url: default_media_api_url(),
        }
    }
}

impl Config {
    /// Load from the default path, then apply environment overrides.
    pub fn load() -> Self {
        let mut config = Self::load_file(Path::new(CONFIG_PATH));
        config.apply_env();
        config
    }

    /// Parse a config file, falling back to defaults on any problem.
    /// A broken config file must not keep the daemon from starting.
    pub fn load_file(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(raw) => match toml::from_str(&raw) {
                Ok(config) => {
                    info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("Invalid config at {}: {} - using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Cannot read {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Environment overrides. FAUNA_API_KEY falls back to GROQ_API_KEY and
    /// FAUNA_PORT to PORT, the names the original deployment used.
    fn apply_env(&mut self) {
        if let Some(key) = env_var("FAUNA_API_KEY").or_else(|| env_var("GROQ_API_KEY")) {
            self.api_key = Some(key);
        }

        if let Some(flag) = env_var("FAUNA_MOCK").or_else(|| env_var("MOCK_RESPONSE")) {
            self.mock_mode = flag == "1" || flag.eq_ignore_ascii_case("true");
        }

        if let Some(port) = env_var("FAUNA_PORT").or_else(|| env_var("PORT")) {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => warn!("Ignoring non-numeric port override: {}", port),
            }
        }
    }

    /// Whether a usable credential is configured.
    pub fn has_credential(&self) -> bool {
        self.api_key
            .as_deref()
            .map(|key| !key.trim().is_empty())
            .unwrap_or(false)
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
