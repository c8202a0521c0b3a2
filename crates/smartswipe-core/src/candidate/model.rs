//! Candidate item domain model.

use super::domain::Domain;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned identifier of a candidate item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(String);

impl CandidateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CandidateId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// One discoverable startup concept the user accepts or rejects.
///
/// Immutable once received. The serialized form matches the backend's idea
/// payload, so the same type is used on the wire and in the funnel store.
/// Server bookkeeping fields are carried through unchanged so the synthesis
/// service receives the ideas exactly as it issued them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateItem {
    pub id: CandidateId,
    #[serde(default)]
    pub domain: Domain,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Display order is significant.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_for_domains: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl CandidateItem {
    pub fn new(
        id: impl Into<String>,
        domain: Domain,
        title: impl Into<String>,
        description: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            id: CandidateId::new(id),
            domain,
            title: title.into(),
            description: description.into(),
            tags,
            generated_for_domains: None,
            created_at: None,
        }
    }

    /// Tags shown on the swipe card (the first four).
    pub fn card_tags(&self) -> &[String] {
        &self.tags[..self.tags.len().min(4)]
    }
}
