//! Species lookup keys.
//!
//! A `SpeciesKey` is the normalized form of a caller-supplied animal name:
//! trimmed and case-folded. The reference table, the dedicated image
//! providers and the badge palette are all keyed by exact `SpeciesKey`
//! equality, so "Chat", " chat " and "CHAT" land on the same entry while
//! "chaton" does not. Display names keep the caller's casing.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeciesKey(String);

impl SpeciesKey {
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SpeciesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
