//! Error types for the terminology client

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Transport-level failures talking to the terminology server.
///
/// Shape problems in an otherwise well-formed JSON body are not errors at
/// this layer; the verification pipeline classifies those itself.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to construct HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("GET {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("GET {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("GET {url} returned invalid JSON: {source}")]
    Json {
        url: String,
        source: serde_json::Error,
    },
}
