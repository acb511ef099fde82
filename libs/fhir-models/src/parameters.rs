//! FHIR Parameters model
//!
//! `$lookup` and `$translate` answer with a Parameters resource; the checks
//! only need to know which named parameters came back.

use super::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// FHIR Parameters resource
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Parameters {
    /// Resource type - always "Parameters"
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    /// Operation parameters
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameter: Vec<ParametersParameter>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "Parameters".to_string()
}

/// One operation parameter
///
/// The `value[x]` choice and any `part` children stay untyped; presence of
/// the name is all the verification logic keys on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ParametersParameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub value: HashMap<String, Value>,
}

impl Parameters {
    /// Parse from JSON Value
    pub fn from_value(value: &Value) -> Result<Self> {
        serde_json::from_value(value.clone()).map_err(Error::from)
    }

    /// First parameter with the given name.
    pub fn find(&self, name: &str) -> Option<&ParametersParameter> {
        self.parameter
            .iter()
            .find(|p| p.name.as_deref() == Some(name))
    }

    /// Whether a parameter with the given name is present.
    pub fn has(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Whether any parameter carries one of the given names.
    pub fn any_of(&self, names: &[&str]) -> bool {
        self.parameter
            .iter()
            .any(|p| p.name.as_deref().is_some_and(|n| names.contains(&n)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn translate_result_with_match() {
        let params = Parameters::from_value(&json!({
            "resourceType": "Parameters",
            "parameter": [
                {"name": "result", "valueBoolean": true},
                {"name": "match", "part": [{"name": "equivalence", "valueCode": "equivalent"}]}
            ]
        }))
        .unwrap();
        assert!(params.has("match"));
        assert!(params.find("match").unwrap().value.contains_key("part"));
    }

    #[test]
    fn lookup_result_signal_names() {
        let params = Parameters::from_value(&json!({
            "resourceType": "Parameters",
            "parameter": [
                {"name": "name", "valueString": "SNOMED CT"},
                {"name": "display", "valueString": "Example concept"}
            ]
        }))
        .unwrap();
        assert!(params.any_of(&["display", "name", "code"]));
        assert!(!params.any_of(&["match"]));
    }

    #[test]
    fn empty_parameter_list_is_tolerated() {
        let params = Parameters::from_value(&json!({"resourceType": "Parameters"})).unwrap();
        assert!(!params.has("match"));
        assert!(!params.any_of(&["display", "name", "code"]));
    }
}
