//! Blocking HTTP client for a FHIR terminology server
//!
//! The smoke checks are strictly sequential, so every call here is
//! synchronous and blocking with a fixed timeout and a bounded immediate
//! retry. The client covers the small read-only surface the checks need:
//! capability probe, paged listings, resource reads, `$expand`, `$lookup`
//! and `$translate`.
//!
//! # Examples
//!
//! ```rust,no_run
//! use glossa_terminology_client::{ClientConfig, TerminologyClient};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = TerminologyClient::new(ClientConfig::new("http://localhost:8180/fhir"))?;
//! let capability = client.capability()?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::{TerminologyClient, TranslateRequest};
pub use config::ClientConfig;
pub use error::{Error, Result};
