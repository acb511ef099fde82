//! The blocking client and its operation URL builders.

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde_json::Value;
use std::thread;

const FHIR_JSON: &str = "application/fhir+json";

/// Blocking client for the read-only terminology surface.
pub struct TerminologyClient {
    http: Client,
    config: ClientConfig,
}

impl TerminologyClient {
    /// Build a client from an immutable configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(FHIR_JSON));
        let http = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(Error::Build)?;
        Ok(Self { http, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// GET `url` and parse the body as JSON, with bounded retry.
    ///
    /// Makes `retries + 1` attempts, sleeping `retry_delay` between them;
    /// the last error wins. Transport failures, non-2xx statuses and
    /// unparseable bodies all count as failed attempts.
    pub fn get_json(&self, url: &str) -> Result<Value> {
        let mut attempt = 0;
        loop {
            match self.get_json_once(url) {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.config.retries => {
                    attempt += 1;
                    tracing::debug!(url, attempt, error = %err, "GET failed, retrying");
                    thread::sleep(self.config.retry_delay);
                }
                Err(err) => {
                    tracing::debug!(url, error = %err, "GET failed, retries exhausted");
                    return Err(err);
                }
            }
        }
    }

    fn get_json_once(&self, url: &str) -> Result<Value> {
        let response = self.http.get(url).send().map_err(|source| Error::Request {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|source| Error::Request {
            url: url.to_string(),
            source,
        })?;
        serde_json::from_str(&body).map_err(|source| Error::Json {
            url: url.to_string(),
            source,
        })
    }

    /// `GET {base}/metadata`
    pub fn capability(&self) -> Result<Value> {
        self.get_json(&format!("{}/metadata", self.base_url()))
    }

    /// GET an absolute listing-page URL. Paging links are server-supplied
    /// and followed verbatim, so no query assembly happens here.
    pub fn page(&self, url: &str) -> Result<Value> {
        self.get_json(url)
    }

    /// `GET {base}/{type}/{id}`
    pub fn read(&self, resource_type: &str, id: &str) -> Result<Value> {
        self.get_json(&read_url(self.base_url(), resource_type, id))
    }

    /// `GET {base}/ValueSet/$expand?url=...&_count=...[&_elements=...]`
    pub fn expand_url(&self, canonical: &str, count: u32, elements: Option<&str>) -> Result<Value> {
        self.get_json(&expand_url_query(self.base_url(), canonical, count, elements))
    }

    /// `GET {base}/ValueSet/{id}/$expand?_count=...[&_elements=...]`
    pub fn expand_id(&self, id: &str, count: u32, elements: Option<&str>) -> Result<Value> {
        self.get_json(&expand_id_query(self.base_url(), id, count, elements))
    }

    /// `GET {base}/CodeSystem/$lookup?system=...&code=...`
    pub fn lookup(&self, system: &str, code: &str) -> Result<Value> {
        self.get_json(&lookup_query(self.base_url(), system, code))
    }

    /// `GET {base}/ConceptMap/$translate?url=...&code=...&system=...&source=...&target=...`
    pub fn translate(&self, request: &TranslateRequest) -> Result<Value> {
        self.get_json(&translate_query(self.base_url(), request))
    }

    /// `GET {base}/{type}?url=...&_summary=count`
    pub fn search_count(&self, resource_type: &str, canonical: &str) -> Result<Value> {
        self.get_json(&count_query(self.base_url(), resource_type, canonical))
    }
}

/// Inputs for `ConceptMap/$translate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateRequest {
    /// Canonical URL of the ConceptMap
    pub url: String,
    /// Code being translated
    pub code: String,
    /// System the code belongs to
    pub system: String,
    /// Source value-set scope
    pub source: String,
    /// Target value-set scope
    pub target: String,
}

impl TranslateRequest {
    /// The request line in decoded form, for human-readable check output.
    pub fn display_url(&self, base: &str) -> String {
        format!(
            "{base}/ConceptMap/$translate?url={}&code={}&system={}&source={}&target={}",
            self.url, self.code, self.system, self.source, self.target
        )
    }
}

fn enc(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn read_url(base: &str, resource_type: &str, id: &str) -> String {
    format!("{base}/{resource_type}/{}", enc(id))
}

fn expand_url_query(base: &str, canonical: &str, count: u32, elements: Option<&str>) -> String {
    let mut url = format!("{base}/ValueSet/$expand?url={}&_count={count}", enc(canonical));
    if let Some(elements) = elements {
        url.push_str("&_elements=");
        url.push_str(elements);
    }
    url
}

fn expand_id_query(base: &str, id: &str, count: u32, elements: Option<&str>) -> String {
    let mut url = format!("{base}/ValueSet/{}/$expand?_count={count}", enc(id));
    if let Some(elements) = elements {
        url.push_str("&_elements=");
        url.push_str(elements);
    }
    url
}

fn lookup_query(base: &str, system: &str, code: &str) -> String {
    format!(
        "{base}/CodeSystem/$lookup?system={}&code={}",
        enc(system),
        enc(code)
    )
}

fn translate_query(base: &str, request: &TranslateRequest) -> String {
    format!(
        "{base}/ConceptMap/$translate?url={}&code={}&system={}&source={}&target={}",
        enc(&request.url),
        enc(&request.code),
        enc(&request.system),
        enc(&request.source),
        enc(&request.target)
    )
}

fn count_query(base: &str, resource_type: &str, canonical: &str) -> String {
    format!("{base}/{resource_type}?url={}&_summary=count", enc(canonical))
}
