//! FHIR Bundle model
//!
//! Search-set flavored: paging links, the entry resources and the search
//! total are what the terminology checks read. Everything else rides along
//! in `extensions`.

use super::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// FHIR Bundle resource
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    /// Resource type - always "Bundle"
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    /// Logical id of this artifact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// searchset, collection, ... - kept as free text; the checks only ever
    /// walk search results
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub bundle_type: Option<String>,

    /// If search, the total number of matches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,

    /// Links related to this Bundle
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub link: Vec<BundleLink>,

    /// Entry in the bundle - will have a resource or information
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entry: Vec<BundleEntry>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "Bundle".to_string()
}

/// Links related to this Bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleLink {
    /// Relation name, e.g. `self`, `next`, `previous`
    #[serde(default)]
    pub relation: String,

    /// Reference details for the link
    #[serde(default)]
    pub url: String,
}

/// Entry in the bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntry {
    /// Full URL for the entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_url: Option<String>,

    /// A resource in this bundle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Value>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

impl Bundle {
    /// Parse from JSON Value
    pub fn from_value(value: &Value) -> Result<Self> {
        serde_json::from_value(value.clone()).map_err(Error::from)
    }

    /// Get the number of entries in the bundle
    pub fn entry_count(&self) -> usize {
        self.entry.len()
    }

    /// The search total, 0 when the server did not declare one.
    pub fn search_total(&self) -> u64 {
        self.total.unwrap_or(0)
    }

    /// URL of the `next` paging link, if the server supplied a non-empty one.
    pub fn next_link(&self) -> Option<&str> {
        self.link
            .iter()
            .find(|l| l.relation == "next" && !l.url.is_empty())
            .map(|l| l.url.as_str())
    }

    /// Entry resources declaring the given `resourceType`.
    pub fn resources_of_type<'a>(
        &'a self,
        resource_type: &'a str,
    ) -> impl Iterator<Item = &'a Value> {
        self.entry
            .iter()
            .filter_map(|e| e.resource.as_ref())
            .filter(move |r| crate::resource_type(r) == Some(resource_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn searchset() -> Value {
        json!({
            "resourceType": "Bundle",
            "type": "searchset",
            "total": 2,
            "link": [
                {"relation": "self", "url": "http://example.org/fhir/ValueSet?_count=1"},
                {"relation": "next", "url": "http://example.org/fhir/ValueSet?_count=1&page=2"}
            ],
            "entry": [
                {"resource": {"resourceType": "ValueSet", "id": "vs-1"}},
                {"resource": {"resourceType": "OperationOutcome", "id": "oo-1"}}
            ]
        })
    }

    #[test]
    fn deserializes_searchset() {
        let bundle = Bundle::from_value(&searchset()).unwrap();
        assert_eq!(bundle.bundle_type.as_deref(), Some("searchset"));
        assert_eq!(bundle.search_total(), 2);
        assert_eq!(bundle.entry_count(), 2);
    }

    #[test]
    fn next_link_found_by_relation() {
        let bundle = Bundle::from_value(&searchset()).unwrap();
        assert_eq!(
            bundle.next_link(),
            Some("http://example.org/fhir/ValueSet?_count=1&page=2")
        );
    }

    #[test]
    fn next_link_absent_on_last_page() {
        let bundle = Bundle::from_value(&json!({
            "resourceType": "Bundle",
            "link": [{"relation": "self", "url": "http://example.org/fhir/ValueSet"}]
        }))
        .unwrap();
        assert_eq!(bundle.next_link(), None);
    }

    #[test]
    fn empty_next_url_is_ignored() {
        let bundle = Bundle::from_value(&json!({
            "resourceType": "Bundle",
            "link": [{"relation": "next", "url": ""}]
        }))
        .unwrap();
        assert_eq!(bundle.next_link(), None);
    }

    #[test]
    fn resources_of_type_filters_entries() {
        let bundle = Bundle::from_value(&searchset()).unwrap();
        let value_sets: Vec<_> = bundle.resources_of_type("ValueSet").collect();
        assert_eq!(value_sets.len(), 1);
        assert_eq!(value_sets[0]["id"], "vs-1");
    }

    #[test]
    fn tolerates_missing_entry_and_link() {
        let bundle = Bundle::from_value(&json!({"resourceType": "Bundle"})).unwrap();
        assert_eq!(bundle.entry_count(), 0);
        assert_eq!(bundle.next_link(), None);
        assert_eq!(bundle.search_total(), 0);
    }
}
