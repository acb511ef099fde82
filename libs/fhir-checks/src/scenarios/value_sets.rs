//! ValueSet expansion checks.
//!
//! Lists every ValueSet, asserts the server holds exactly the expected
//! number, then expands each one and requires at least one concept.

use crate::classify::require_exact_total;
use crate::collector::{collect, Record};
use crate::error::FatalError;
use crate::gateway::TerminologyApi;
use crate::outcome::{RunSummary, Verdict};
use crate::probe::probe;
use crate::report::Reporter;
use glossa_models::{parse_resource, ValueSet};

pub const DEFAULT_EXPECTED_TOTAL: usize = 24;
pub const DEFAULT_PAGE_SIZE: u32 = 200;

const LISTING_ELEMENTS: &str = "id,url";
const EXPANSION_ELEMENTS: &str = "expansion.total,expansion.contains";

/// Options for the value-set scenario.
#[derive(Debug, Clone)]
pub struct ValueSetCheck {
    /// The listing must contain exactly this many entries
    pub expected_total: usize,
    /// `_count` hint for listing pages
    pub page_size: u32,
}

impl Default for ValueSetCheck {
    fn default() -> Self {
        Self {
            expected_total: DEFAULT_EXPECTED_TOTAL,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

pub fn run(
    api: &dyn TerminologyApi,
    report: &mut Reporter<'_>,
    options: &ValueSetCheck,
) -> Result<RunSummary, FatalError> {
    probe(api, report)?;

    report.info("listing ValueSet resources");
    let first_url = format!(
        "{}/ValueSet?_count={}&_elements={}",
        api.base_url(),
        options.page_size,
        LISTING_ELEMENTS
    );
    let listing = collect(api, "ValueSet", &first_url)?;
    report.ok(format!("ValueSet resources listed: {}", listing.raw_entries));

    require_exact_total(&listing, "ValueSet", options.expected_total)?;
    report.ok(format!("ValueSet total = {}", options.expected_total));

    report.info("expanding each ValueSet (at least one concept required)");
    let mut summary = RunSummary::default();
    for record in &listing.records {
        verify_expansion(api, report, &mut summary, record);
    }

    report.summary("ValueSet expansions", &summary);
    if !summary.has_failures() {
        report.ok(format!(
            "all {} ValueSet resources expand with at least one concept",
            summary.ok
        ));
    }
    Ok(summary)
}

fn verify_expansion(
    api: &dyn TerminologyApi,
    report: &mut Reporter<'_>,
    summary: &mut RunSummary,
    record: &Record,
) {
    // Canonical URL preferred; expansion by id is the fallback for
    // ValueSets the server lists without one.
    let (label, response) = if let Some(url) = record.url.as_deref() {
        (url.to_string(), api.expand_url(url, 1, Some(EXPANSION_ELEMENTS)))
    } else if let Some(id) = record.id.as_deref() {
        (
            format!("ValueSet/{id}"),
            api.expand_id(id, 1, Some(EXPANSION_ELEMENTS)),
        )
    } else {
        // The collector guarantees id or url; nothing to verify otherwise.
        return;
    };

    let value = match response {
        Ok(value) => value,
        Err(_) => {
            return summary.record(report, Verdict::Fail, format!("{label} -> invalid response"))
        }
    };
    let value_set: ValueSet = match parse_resource(&value, "ValueSet") {
        Ok(value_set) => value_set,
        Err(_) => {
            return summary.record(report, Verdict::Fail, format!("{label} -> invalid response"))
        }
    };

    if value_set.expansion_total() > 0 || !value_set.expansion_contains().is_empty() {
        summary.record(report, Verdict::Ok, label);
    } else {
        summary.record(report, Verdict::Fail, format!("{label} (no concepts)"));
    }
}
