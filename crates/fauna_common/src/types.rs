//! Wire types shared between the daemon and its clients.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Which source produced a record's facts.
///
/// Serialized with the wire-visible labels the frontend expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provenance {
    #[serde(rename = "Remote Knowledge Source")]
    RemoteKnowledgeSource,
    #[serde(rename = "Mock Database")]
    ReferenceTable,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::RemoteKnowledgeSource => f.write_str("Remote Knowledge Source"),
            Provenance::ReferenceTable => f.write_str("Mock Database"),
        }
    }
}

/// Image reference. The URL is always dereferenceable: either a remote
/// HTTP(S) resource or a self-contained `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
}

/// Factual fields of an animal record, before an image is attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalFacts {
    pub name: String,
    pub species: String,
    pub size: String,
    pub weight: String,
    pub description: String,
}

/// Complete record returned by `POST /animal`. Every field is non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalRecord {
    pub name: String,
    pub species: String,
    pub size: String,
    pub weight: String,
    pub description: String,
    pub image: ImageRef,
    pub source: Provenance,
}

impl AnimalRecord {
    pub fn from_parts(facts: AnimalFacts, image: ImageRef, source: Provenance) -> Self {
        Self {
            name: facts.name,
            species: facts.species,
            size: facts.size,
            weight: facts.weight,
            description: facts.description,
            image,
            source,
        }
    }
}

/// Body of `POST /animal`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalRequest {
    pub name: Option<String>,
}

/// Body of `POST /ai`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRequest {
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Body of `POST /query`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: Option<String>,
}

/// Response of `POST /ai`: the upstream payload as received, plus the text
/// extracted from it when one of the known shapes matched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionAnswer {
    pub raw: Value,
    pub text: Option<String>,
}

/// Response of `GET /v1/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provenance_wire_labels() {
        assert_eq!(
            serde_json::to_string(&Provenance::RemoteKnowledgeSource).unwrap(),
            "\"Remote Knowledge Source\""
        );
        assert_eq!(
            serde_json::to_string(&Provenance::ReferenceTable).unwrap(),
            "\"Mock Database\""
        );
    }

    #[test]
    fn test_animal_record_flattens_facts() {
        let facts = AnimalFacts {
            name: "Lion".to_string(),
            species: "Panthera leo".to_string(),
            size: "1.7-2.5 m".to_string(),
            weight: "190-250 kg".to_string(),
            description: "Grand félin africain.".to_string(),
        };
        let record = AnimalRecord::from_parts(
            facts,
            ImageRef {
                url: "https://example.org/lion.jpg".to_string(),
            },
            Provenance::ReferenceTable,
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["name"], "Lion");
        assert_eq!(json["species"], "Panthera leo");
        assert_eq!(json["image"]["url"], "https://example.org/lion.jpg");
        assert_eq!(json["source"], "Mock Database");
    }

    #[test]
    fn test_prompt_request_omits_missing_model() {
        let req = PromptRequest {
            prompt: Some("hello".to_string()),
            model: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("model"));
    }
}
