//! Animal record resolution.
//!
//! Orchestrates the fact cascade - knowledge endpoint, then the reference
//! table, then unknown-species synthesis - and attaches an image through
//! the image router. Upstream trouble never escapes this module: the only
//! error a caller can see is a missing name, raised before any upstream
//! call is attempted.

use crate::config::Config;
use crate::facts;
use crate::images::ImageSourceRouter;
use crate::knowledge::KnowledgeQueryClient;
use fauna_common::{AnimalFacts, AnimalRecord, Provenance, SpeciesKey};
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Missing name")]
    EmptyName,
}

pub struct AnimalInfoResolver {
    knowledge: KnowledgeQueryClient,
    images: ImageSourceRouter,
    /// Knowledge lookups only happen with a credential and outside mock
    /// mode; otherwise the reference table answers directly.
    use_knowledge: bool,
}

impl AnimalInfoResolver {
    pub fn new(config: &Config) -> Self {
        Self {
            knowledge: KnowledgeQueryClient::new(config),
            images: ImageSourceRouter::new(config),
            use_knowledge: config.has_credential() && !config.mock_mode,
        }
    }

    /// Resolve a complete record for `name`. Always succeeds for a
    /// non-blank name, whatever the upstreams are doing.
    pub async fn resolve(&self, name: &str) -> Result<AnimalRecord, ResolveError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ResolveError::EmptyName);
        }
        let key = SpeciesKey::new(name);

        let (facts, source) = if self.use_knowledge {
            match self.knowledge.animal_facts(name).await {
                Ok(facts) => {
                    info!("Knowledge endpoint described {}", name);
                    (facts, Provenance::RemoteKnowledgeSource)
                }
                Err(e) => {
                    warn!(
                        "Knowledge lookup failed for {}: {} - using reference table",
                        name, e
                    );
                    (self.reference_facts(&key, name), Provenance::ReferenceTable)
                }
            }
        } else {
            (self.reference_facts(&key, name), Provenance::ReferenceTable)
        };

        // The image is keyed off the display name of whichever record won,
        // so a knowledge answer for "chat" still routes to the feline
        // provider. This call cannot fail.
        let image = self.images.resolve(&facts.name).await;

        Ok(AnimalRecord::from_parts(facts, image, source))
    }

    fn reference_facts(&self, key: &SpeciesKey, name: &str) -> AnimalFacts {
        match facts::lookup(key) {
            Some(facts) => facts,
            None => facts::unknown(name),
        }
    }
}
