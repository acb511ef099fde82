//! FHIR CapabilityStatement model
//!
//! Only the slice the connectivity probe cares about.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// FHIR CapabilityStatement resource
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityStatement {
    /// Resource type - always "CapabilityStatement"
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    /// Publication status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// FHIR version the server supports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fhir_version: Option<String>,

    /// Software covered by this statement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub software: Option<CapabilitySoftware>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "CapabilityStatement".to_string()
}

/// Software covered by a CapabilityStatement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CapabilitySoftware {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

impl CapabilityStatement {
    /// `"name version"` when the server declares its software.
    pub fn software_label(&self) -> Option<String> {
        let software = self.software.as_ref()?;
        let name = software.name.as_deref()?.trim();
        if name.is_empty() {
            return None;
        }
        Some(match software.version.as_deref().map(str::trim) {
            Some(version) if !version.is_empty() => format!("{name} {version}"),
            _ => name.to_string(),
        })
    }
}
