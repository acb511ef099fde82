//! FHIR ConceptMap model
//!
//! Carries the canonical identity plus the source/target scope URIs the
//! translate check needs. R4 models the scopes as `sourceUri`/`sourceCanonical`
//! (and the target pair) choice fields; accessors resolve the choice.

use super::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// FHIR ConceptMap resource
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConceptMap {
    /// Resource type - always "ConceptMap"
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    /// Logical id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Canonical identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Business version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Name (computer friendly)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Name (human friendly)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Publication status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Source value set (uri choice)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_uri: Option<String>,

    /// Source value set (canonical choice)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_canonical: Option<String>,

    /// Target value set (uri choice)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_uri: Option<String>,

    /// Target value set (canonical choice)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_canonical: Option<String>,

    /// Additional content beyond core fields (group, etc.)
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "ConceptMap".to_string()
}

impl ConceptMap {
    /// Parse from JSON Value
    pub fn from_value(value: &Value) -> Result<Self> {
        serde_json::from_value(value.clone()).map_err(Error::from)
    }

    /// Canonical URL, trimmed; `None` when absent or blank.
    pub fn canonical(&self) -> Option<&str> {
        non_blank(&self.url)
    }

    /// Source value-set URI: `sourceUri` preferred over `sourceCanonical`.
    pub fn source(&self) -> Option<&str> {
        non_blank(&self.source_uri).or_else(|| non_blank(&self.source_canonical))
    }

    /// Target value-set URI: `targetUri` preferred over `targetCanonical`.
    pub fn target(&self) -> Option<&str> {
        non_blank(&self.target_uri).or_else(|| non_blank(&self.target_canonical))
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
