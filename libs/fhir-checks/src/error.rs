//! Fatal run errors.
//!
//! A fatal error aborts the whole run before a summary is produced. The CLI
//! prints it as a single `[FAIL]` line and exits 1; per-record failures are
//! not errors at this level, they are counted by the aggregator.

use glossa_terminology_client::Error as TransportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FatalError {
    #[error("server did not answer /metadata at {base}")]
    Probe { base: String },

    #[error("failed to list {resource_type} resources: {source}")]
    Listing {
        resource_type: String,
        source: TransportError,
    },

    #[error("unexpected {resource_type} listing shape: {message}")]
    ListingShape {
        resource_type: String,
        message: String,
    },

    #[error("server repeated the page link {url}; aborting pagination")]
    RepeatedPageLink { url: String },

    #[error("listed {found} {resource_type} resources; exactly {expected} required")]
    UnexpectedTotal {
        resource_type: String,
        found: usize,
        expected: usize,
    },

    #[error("CodeSystem {label} not found ({url})")]
    CodeSystemMissing { label: String, url: String },

    #[error("$lookup {label} failed ({system}|{code})")]
    LookupFailed {
        label: String,
        system: String,
        code: String,
    },
}
