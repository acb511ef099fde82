//! The seam between the pipeline and the HTTP client.
//!
//! Scenarios talk to a [`TerminologyApi`] so tests can drive them against
//! an in-memory fake; [`TerminologyClient`] is the production
//! implementation. All operations return raw JSON - shape checking is the
//! pipeline's job, because a wrong shape must be *classified*, not thrown.

use glossa_terminology_client::{Result, TerminologyClient, TranslateRequest};
use serde_json::Value;

/// Read-only surface of a FHIR terminology server.
pub trait TerminologyApi {
    /// Server base URL, used for labels and first-page construction.
    fn base_url(&self) -> &str;

    /// `GET {base}/metadata`
    fn capability(&self) -> Result<Value>;

    /// GET an absolute listing-page URL (next links are followed verbatim).
    fn page(&self, url: &str) -> Result<Value>;

    /// `GET {base}/{type}/{id}`
    fn read(&self, resource_type: &str, id: &str) -> Result<Value>;

    /// `GET {base}/ValueSet/$expand?url=...`
    fn expand_url(&self, canonical: &str, count: u32, elements: Option<&str>) -> Result<Value>;

    /// `GET {base}/ValueSet/{id}/$expand?...`
    fn expand_id(&self, id: &str, count: u32, elements: Option<&str>) -> Result<Value>;

    /// `GET {base}/CodeSystem/$lookup?system=...&code=...`
    fn lookup(&self, system: &str, code: &str) -> Result<Value>;

    /// `GET {base}/ConceptMap/$translate?...`
    fn translate(&self, request: &TranslateRequest) -> Result<Value>;

    /// `GET {base}/{type}?url=...&_summary=count`
    fn search_count(&self, resource_type: &str, canonical: &str) -> Result<Value>;
}

impl TerminologyApi for TerminologyClient {
    fn base_url(&self) -> &str {
        TerminologyClient::base_url(self)
    }

    fn capability(&self) -> Result<Value> {
        TerminologyClient::capability(self)
    }

    fn page(&self, url: &str) -> Result<Value> {
        TerminologyClient::page(self, url)
    }

    fn read(&self, resource_type: &str, id: &str) -> Result<Value> {
        TerminologyClient::read(self, resource_type, id)
    }

    fn expand_url(&self, canonical: &str, count: u32, elements: Option<&str>) -> Result<Value> {
        TerminologyClient::expand_url(self, canonical, count, elements)
    }

    fn expand_id(&self, id: &str, count: u32, elements: Option<&str>) -> Result<Value> {
        TerminologyClient::expand_id(self, id, count, elements)
    }

    fn lookup(&self, system: &str, code: &str) -> Result<Value> {
        TerminologyClient::lookup(self, system, code)
    }

    fn translate(&self, request: &TranslateRequest) -> Result<Value> {
        TerminologyClient::translate(self, request)
    }

    fn search_count(&self, resource_type: &str, canonical: &str) -> Result<Value> {
        TerminologyClient::search_count(self, resource_type, canonical)
    }
}
