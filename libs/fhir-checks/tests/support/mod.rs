//! In-memory `TerminologyApi` fake and JSON fixture builders.
#![allow(dead_code)]

use glossa_checks::TerminologyApi;
use glossa_terminology_client::{Error, Result, TranslateRequest};
use serde_json::{json, Value};
use std::collections::HashMap;

pub const BASE: &str = "http://fake.test/fhir";

/// Routes keyed the way scenarios call the gateway. A missing route answers
/// like an endpoint that stayed unreachable through every retry.
#[derive(Default)]
pub struct FakeTerminology {
    pub capability: Option<Value>,
    /// page URL -> listing bundle
    pub pages: HashMap<String, Value>,
    /// (resource type, id) -> resource
    pub resources: HashMap<(String, String), Value>,
    /// canonical URL -> expansion response
    pub expansions_by_url: HashMap<String, Value>,
    /// id -> expansion response
    pub expansions_by_id: HashMap<String, Value>,
    /// (system, code) -> lookup response
    pub lookups: HashMap<(String, String), Value>,
    /// concept map URL -> translate response
    pub translations: HashMap<String, Value>,
    /// canonical URL -> count bundle
    pub counts: HashMap<String, Value>,
}

impl FakeTerminology {
    /// A fake that at least answers the connectivity probe.
    pub fn with_capability() -> Self {
        Self {
            capability: Some(json!({
                "resourceType": "CapabilityStatement",
                "status": "active",
                "fhirVersion": "4.0.1"
            })),
            ..Self::default()
        }
    }

    pub fn insert_resource(&mut self, resource_type: &str, id: &str, value: Value) {
        self.resources
            .insert((resource_type.to_string(), id.to_string()), value);
    }

    fn unreachable(url: impl Into<String>) -> Error {
        Error::Status {
            url: url.into(),
            status: 503,
        }
    }

    fn route(map: &HashMap<String, Value>, key: &str) -> Result<Value> {
        map.get(key).cloned().ok_or_else(|| Self::unreachable(key))
    }
}

impl TerminologyApi for FakeTerminology {
    fn base_url(&self) -> &str {
        BASE
    }

    fn capability(&self) -> Result<Value> {
        self.capability
            .clone()
            .ok_or_else(|| Self::unreachable(format!("{BASE}/metadata")))
    }

    fn page(&self, url: &str) -> Result<Value> {
        Self::route(&self.pages, url)
    }

    fn read(&self, resource_type: &str, id: &str) -> Result<Value> {
        self.resources
            .get(&(resource_type.to_string(), id.to_string()))
            .cloned()
            .ok_or_else(|| Self::unreachable(format!("{BASE}/{resource_type}/{id}")))
    }

    fn expand_url(&self, canonical: &str, _count: u32, _elements: Option<&str>) -> Result<Value> {
        Self::route(&self.expansions_by_url, canonical)
    }

    fn expand_id(&self, id: &str, _count: u32, _elements: Option<&str>) -> Result<Value> {
        Self::route(&self.expansions_by_id, id)
    }

    fn lookup(&self, system: &str, code: &str) -> Result<Value> {
        self.lookups
            .get(&(system.to_string(), code.to_string()))
            .cloned()
            .ok_or_else(|| Self::unreachable(format!("{BASE}/CodeSystem/$lookup")))
    }

    fn translate(&self, request: &TranslateRequest) -> Result<Value> {
        Self::route(&self.translations, &request.url)
    }

    fn search_count(&self, _resource_type: &str, canonical: &str) -> Result<Value> {
        Self::route(&self.counts, canonical)
    }
}

// ---- fixture builders ----

/// Search bundle holding the given resources, with an optional next link.
pub fn searchset(resources: Vec<Value>, next: Option<&str>) -> Value {
    let entries: Vec<Value> = resources.into_iter().map(|r| json!({"resource": r})).collect();
    let mut links = vec![json!({"relation": "self", "url": format!("{BASE}/self")})];
    if let Some(next) = next {
        links.push(json!({"relation": "next", "url": next}));
    }
    json!({
        "resourceType": "Bundle",
        "type": "searchset",
        "link": links,
        "entry": entries
    })
}

/// ConceptMap as it appears in a listing (id + name only).
pub fn concept_map(id: &str, name: &str) -> Value {
    json!({"resourceType": "ConceptMap", "id": id, "name": name})
}

/// Full ConceptMap detail with translate scopes.
pub fn concept_map_detail(id: &str, name: &str, url: &str, source: &str, target: &str) -> Value {
    json!({
        "resourceType": "ConceptMap",
        "id": id,
        "name": name,
        "url": url,
        "sourceUri": source,
        "targetUri": target
    })
}

/// Expanded ValueSet with the given `(code, system)` concepts.
pub fn expansion(total: i64, concepts: &[(&str, &str)]) -> Value {
    let contains: Vec<Value> = concepts
        .iter()
        .map(|(code, system)| json!({"code": code, "system": system}))
        .collect();
    json!({
        "resourceType": "ValueSet",
        "expansion": {
            "timestamp": "2024-05-01T00:00:00Z",
            "total": total,
            "contains": contains
        }
    })
}

/// Parameters resource carrying the given parameter names.
pub fn parameters(names: &[&str]) -> Value {
    let parameter: Vec<Value> = names.iter().map(|name| json!({"name": name})).collect();
    json!({"resourceType": "Parameters", "parameter": parameter})
}

/// `_summary=count` search bundle.
pub fn count_bundle(total: u64) -> Value {
    json!({"resourceType": "Bundle", "type": "searchset", "total": total})
}

/// Count the output lines starting with the given tag.
pub fn lines_tagged(text: &str, tag: &str) -> usize {
    text.lines()
        .filter(|line| line.starts_with(&format!("[{tag}]")))
        .count()
}
