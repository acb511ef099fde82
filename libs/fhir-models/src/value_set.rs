//! FHIR ValueSet model (terminology)
//!
//! The expansion checks read `expansion.total` and `expansion.contains`;
//! the compose side of a ValueSet is out of scope and lands in `extensions`.

use super::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// FHIR ValueSet resource
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValueSet {
    /// Resource type - always "ValueSet"
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

    /// Publication status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Used when the value set is "expanded"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expansion: Option<ValueSetExpansion>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "ValueSet".to_string()
}

/// Expansion of the value set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ValueSetExpansion {
    /// Uniquely identifies this expansion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    /// Time the expansion was generated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Total number of codes in the expansion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,

    /// Offset at which this page starts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,

    /// Codes in the value set
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contains: Vec<ValueSetExpansionContains>,
}

/// Codes in an expansion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ValueSetExpansionContains {
    /// System value for the code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Code - if blank, this is not a selectable code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// User display for the concept
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl ValueSet {
    /// Parse from JSON Value
    pub fn from_value(value: &Value) -> Result<Self> {
        serde_json::from_value(value.clone()).map_err(Error::from)
    }

    /// Declared expansion total, 0 when absent.
    pub fn expansion_total(&self) -> i64 {
        self.expansion.as_ref().and_then(|e| e.total).unwrap_or(0)
    }

    /// Codes in the expansion, empty when there is none.
    pub fn expansion_contains(&self) -> &[ValueSetExpansionContains] {
        self.expansion
            .as_ref()
            .map(|e| e.contains.as_slice())
            .unwrap_or(&[])
    }

    /// First code of the expansion, if any.
    pub fn first_concept(&self) -> Option<&ValueSetExpansionContains> {
        self.expansion_contains().first()
    }
}

impl ValueSetExpansionContains {
    /// `(code, system)` with both trimmed and non-empty, else `None`.
    pub fn code_system_pair(&self) -> Option<(&str, &str)> {
        let code = self.code.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let system = self
            .system
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())?;
        Some((code, system))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expansion_fields_read_through() {
        let vs = ValueSet::from_value(&json!({
            "resourceType": "ValueSet",
            "url": "http://example.org/vs/colors",
            "expansion": {
                "timestamp": "2024-05-01T00:00:00Z",
                "total": 3,
                "contains": [
                    {"system": "http://example.org/cs", "code": "red", "display": "Red"}
                ]
            }
        }))
        .unwrap();
        assert_eq!(vs.expansion_total(), 3);
        assert_eq!(vs.expansion_contains().len(), 1);
        assert_eq!(
            vs.first_concept().unwrap().code_system_pair(),
            Some(("red", "http://example.org/cs"))
        );
    }

    #[test]
    fn missing_expansion_reads_as_empty() {
        let vs = ValueSet::from_value(&json!({"resourceType": "ValueSet"})).unwrap();
        assert_eq!(vs.expansion_total(), 0);
        assert!(vs.expansion_contains().is_empty());
        assert!(vs.first_concept().is_none());
    }

    #[test]
    fn blank_code_or_system_yields_no_pair() {
        let concept = ValueSetExpansionContains {
            system: Some(" ".to_string()),
            code: Some("red".to_string()),
            display: None,
        };
        assert_eq!(concept.code_system_pair(), None);
    }
}
