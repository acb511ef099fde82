//! ConceptMap translation checks.
//!
//! Lists every ConceptMap, selects the ones whose name carries the
//! configured prefix, and verifies each candidate can translate the first
//! concept of its source value set.

use crate::classify::{PrefixPolicy, Selection};
use crate::collector::{collect, Record};
use crate::error::FatalError;
use crate::gateway::TerminologyApi;
use crate::outcome::{RunSummary, Verdict};
use crate::probe::probe;
use crate::report::Reporter;
use glossa_models::{parse_resource, ConceptMap, Parameters, ValueSet};
use glossa_terminology_client::TranslateRequest;

pub const DEFAULT_NAME_PREFIX: &str = "VS";

/// Options for the concept-map scenario.
#[derive(Debug, Clone)]
pub struct ConceptMapCheck {
    /// A name must start with this (after leading whitespace) to be verified
    pub prefix: String,
}

impl Default for ConceptMapCheck {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_NAME_PREFIX.to_string(),
        }
    }
}

pub fn run(
    api: &dyn TerminologyApi,
    report: &mut Reporter<'_>,
    options: &ConceptMapCheck,
) -> Result<RunSummary, FatalError> {
    probe(api, report)?;

    report.info("listing ConceptMap resources (no filters)");
    let listing = collect(api, "ConceptMap", &format!("{}/ConceptMap", api.base_url()))?;
    report.ok(format!(
        "ConceptMap resources listed: {}",
        listing.records.len()
    ));

    let policy = PrefixPolicy {
        resource_type: "ConceptMap",
        prefix: &options.prefix,
    };
    let candidates: Vec<Record> = listing
        .records
        .iter()
        .filter_map(|record| match policy.select(api, record) {
            Selection::Selected(record) => Some(record),
            Selection::Skipped => None,
        })
        .collect();
    report.info(format!(
        "ConceptMap resources named '{}*': {}",
        options.prefix,
        candidates.len()
    ));

    let mut summary = RunSummary::default();
    for record in &candidates {
        verify_translation(api, report, &mut summary, record);
    }

    report.summary("translations", &summary);
    Ok(summary)
}

/// One record, one terminal outcome: detail, source expansion, translate.
fn verify_translation(
    api: &dyn TerminologyApi,
    report: &mut Reporter<'_>,
    summary: &mut RunSummary,
    record: &Record,
) {
    let base = api.base_url();
    let id = record.id.as_deref().unwrap_or_default();
    let detail_label = format!("GET {base}/ConceptMap/{id}");

    let detail = match api.read("ConceptMap", id) {
        Ok(value) => value,
        Err(_) => return summary.record(report, Verdict::Fail, detail_label),
    };
    let concept_map: ConceptMap = match parse_resource(&detail, "ConceptMap") {
        Ok(concept_map) => concept_map,
        Err(_) => return summary.record(report, Verdict::Fail, detail_label),
    };

    let (Some(url), Some(source), Some(target)) = (
        concept_map.canonical(),
        concept_map.source(),
        concept_map.target(),
    ) else {
        return summary.record(
            report,
            Verdict::Fail,
            format!("{detail_label}  (missing url/source/target)"),
        );
    };

    let expand_label = format!("GET {base}/ValueSet/$expand?url={source}&_count=1");
    let expansion = match api.expand_url(source, 1, None) {
        Ok(value) => value,
        Err(_) => return summary.record(report, Verdict::Fail, expand_label),
    };
    let value_set: ValueSet = match parse_resource(&expansion, "ValueSet") {
        Ok(value_set) => value_set,
        Err(_) => return summary.record(report, Verdict::Fail, expand_label),
    };
    let Some(concept) = value_set.first_concept() else {
        return summary.record(report, Verdict::Fail, format!("{expand_label}  (no concepts)"));
    };
    let Some((code, system)) = concept.code_system_pair() else {
        return summary.record(
            report,
            Verdict::Fail,
            format!("{expand_label}  (first concept without code/system)"),
        );
    };

    let request = TranslateRequest {
        url: url.to_string(),
        code: code.to_string(),
        system: system.to_string(),
        source: source.to_string(),
        target: target.to_string(),
    };
    let translate_label = format!("GET {}", request.display_url(base));

    let verdict = match api.translate(&request) {
        Ok(value) => match parse_resource::<Parameters>(&value, "Parameters") {
            Ok(parameters) if parameters.has("match") => Verdict::Ok,
            Ok(_) => Verdict::Warn,
            Err(_) => Verdict::Fail,
        },
        Err(_) => Verdict::Fail,
    };
    summary.record(report, verdict, translate_label);
}
