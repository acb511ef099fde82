//! FHIR data models for terminology checking
//!
//! Lenient serde models for the handful of FHIR shapes the smoke checks
//! consume: search Bundles with paging links, CapabilityStatement,
//! ConceptMap, ValueSet (with expansion) and Parameters. CodeSystem bodies
//! are never read by the checks, so there is no model for them.
//!
//! # Design Philosophy
//!
//! - **Lenient**: every field beyond `resourceType` is optional. The checks
//!   have to *observe* missing data and classify it, so deserialization must
//!   not reject a resource that a strict profile would.
//! - **Extensible**: a flattened `extensions` map captures whatever the
//!   server sends outside the modeled core.
//! - **Compatible**: converts to/from `serde_json::Value`, which is what the
//!   HTTP layer hands around.

pub mod bundle;
pub mod capability_statement;
pub mod concept_map;
pub mod error;
pub mod parameters;
pub mod value_set;

// Re-export commonly used types
pub use bundle::{Bundle, BundleEntry, BundleLink};
pub use capability_statement::{CapabilitySoftware, CapabilityStatement};
pub use concept_map::ConceptMap;
pub use error::{Error, Result};
pub use parameters::{Parameters, ParametersParameter};
pub use value_set::{ValueSet, ValueSetExpansion, ValueSetExpansionContains};

use serde_json::Value;

/// Declared `resourceType` of a JSON resource, if any.
pub fn resource_type(value: &Value) -> Option<&str> {
    value.get("resourceType").and_then(Value::as_str)
}

/// Parse `value` as `T` after checking its declared `resourceType`.
///
/// A missing or mismatched `resourceType` surfaces as
/// [`Error::UnexpectedResourceType`]; the caller decides whether that is
/// fatal for the run or a failure for one record.
pub fn parse_resource<T: serde::de::DeserializeOwned>(value: &Value, expected: &str) -> Result<T> {
    match resource_type(value) {
        Some(found) if found == expected => Ok(serde_json::from_value(value.clone())?),
        found => Err(Error::UnexpectedResourceType {
            expected: expected.to_string(),
            found: found.unwrap_or_default().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resource_type_reads_declared_type() {
        let value = json!({"resourceType": "ValueSet", "id": "vs-1"});
        assert_eq!(resource_type(&value), Some("ValueSet"));
    }

    #[test]
    fn resource_type_absent_on_non_resources() {
        assert_eq!(resource_type(&json!({"id": "x"})), None);
        assert_eq!(resource_type(&json!([1, 2, 3])), None);
    }

    #[test]
    fn parse_resource_rejects_mismatched_type() {
        let value = json!({"resourceType": "OperationOutcome"});
        let err = parse_resource::<ConceptMap>(&value, "ConceptMap").unwrap_err();
        match err {
            Error::UnexpectedResourceType { expected, found } => {
                assert_eq!(expected, "ConceptMap");
                assert_eq!(found, "OperationOutcome");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parse_resource_accepts_matching_type() {
        let value = json!({"resourceType": "ConceptMap", "id": "cm-1", "name": "VSMap"});
        let cm: ConceptMap = parse_resource(&value, "ConceptMap").unwrap();
        assert_eq!(cm.id.as_deref(), Some("cm-1"));
        assert_eq!(cm.name.as_deref(), Some("VSMap"));
    }
}
