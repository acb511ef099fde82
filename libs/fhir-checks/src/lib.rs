//! Terminology server verification pipeline
//!
//! Four sequential stages per run: connectivity probe, paginated collector,
//! classifier/filter, verifier & aggregator. Three scenarios instantiate
//! the pipeline: ConceptMap translation, ValueSet expansion and CodeSystem
//! lookup.
//!
//! Execution is single-threaded and strictly sequential; output lines are
//! emitted in discovery/processing order and the run status derives solely
//! from the FAIL count. Fatal conditions (unreachable server, broken
//! pagination, count-policy mismatch) abort the run before a summary is
//! produced.

pub mod classify;
pub mod collector;
pub mod error;
pub mod gateway;
pub mod outcome;
pub mod probe;
pub mod report;
pub mod scenarios;

pub use collector::{collect, Listing, Record};
pub use error::FatalError;
pub use gateway::TerminologyApi;
pub use outcome::{RunSummary, Verdict};
pub use report::Reporter;
