//! CodeSystem presence and `$lookup` checks.
//!
//! Unlike the other scenarios this one verifies a fixed roster, and a
//! missing code system or an unusable `$lookup` response aborts the run: a
//! server that cannot answer for its core code systems is not worth probing
//! further.

use crate::error::FatalError;
use crate::gateway::TerminologyApi;
use crate::outcome::{RunSummary, Verdict};
use crate::probe::probe;
use crate::report::Reporter;
use glossa_models::{parse_resource, Bundle, Parameters};

/// Parameter names that make a `$lookup` answer fully useful.
const LOOKUP_SIGNALS: &[&str] = &["display", "name", "code"];

/// One roster entry: a code system expected on the server and a code
/// expected to resolve in it.
#[derive(Debug, Clone)]
pub struct CodeSystemProbe {
    pub label: String,
    pub system: String,
    pub code: String,
}

impl CodeSystemProbe {
    pub fn new(
        label: impl Into<String>,
        system: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            system: system.into(),
            code: code.into(),
        }
    }
}

/// Options for the code-system scenario.
#[derive(Debug, Clone)]
pub struct CodeSystemCheck {
    pub targets: Vec<CodeSystemProbe>,
}

impl Default for CodeSystemCheck {
    /// The connectathon roster: SNOMED CT, ICD-10, ICD-11, the local code
    /// system, RACSEL and WHO PreQual.
    fn default() -> Self {
        Self {
            targets: vec![
                CodeSystemProbe::new("SNOMED", "http://snomed.info/sct", "96309000"),
                CodeSystemProbe::new("ICD-10", "http://hl7.org/fhir/sid/icd-10", "E79.0"),
                CodeSystemProbe::new("ICD-11", "http://id.who.int/icd/release/11/mms", "XM0N24"),
                CodeSystemProbe::new("LOCAL", "http://racsel.org/connectathon", "LOCAL123"),
                CodeSystemProbe::new("RACSEL", "http://racsel.org/connectathon", "A10"),
                CodeSystemProbe::new(
                    "PREQUAL",
                    "http://smart.who.int/pcmt-vaxprequal/CodeSystem/PreQualProductIDs",
                    "PolioVaccineInactivatedIProduct8b13b5fcf5e9268b345775be7c3f077c",
                ),
            ],
        }
    }
}

pub fn run(
    api: &dyn TerminologyApi,
    report: &mut Reporter<'_>,
    options: &CodeSystemCheck,
) -> Result<RunSummary, FatalError> {
    probe(api, report)?;

    for target in &options.targets {
        require_present(api, report, target)?;
    }

    let mut summary = RunSummary::default();
    for target in &options.targets {
        verify_lookup(api, report, &mut summary, target)?;
    }

    report.summary("lookups", &summary);
    report.ok("CodeSystem and $lookup validation completed");
    Ok(summary)
}

/// `CodeSystem?url=...&_summary=count` must find at least one instance.
fn require_present(
    api: &dyn TerminologyApi,
    report: &mut Reporter<'_>,
    target: &CodeSystemProbe,
) -> Result<(), FatalError> {
    let found = api
        .search_count("CodeSystem", &target.system)
        .ok()
        .and_then(|value| Bundle::from_value(&value).ok())
        .map(|bundle| bundle.search_total())
        .unwrap_or(0);

    if found >= 1 {
        report.ok(format!(
            "CodeSystem {} present ({})",
            target.label, target.system
        ));
        Ok(())
    } else {
        Err(FatalError::CodeSystemMissing {
            label: target.label.clone(),
            url: target.system.clone(),
        })
    }
}

/// `$lookup` must answer with Parameters; a missing display/name/code is
/// tolerated with a WARN.
fn verify_lookup(
    api: &dyn TerminologyApi,
    report: &mut Reporter<'_>,
    summary: &mut RunSummary,
    target: &CodeSystemProbe,
) -> Result<(), FatalError> {
    let failed = || FatalError::LookupFailed {
        label: target.label.clone(),
        system: target.system.clone(),
        code: target.code.clone(),
    };

    let value = api.lookup(&target.system, &target.code).map_err(|_| failed())?;
    let parameters: Parameters = parse_resource(&value, "Parameters").map_err(|_| failed())?;

    if parameters.any_of(LOOKUP_SIGNALS) {
        summary.record(
            report,
            Verdict::Ok,
            format!("$lookup {} ({})", target.label, target.code),
        );
    } else {
        summary.record(
            report,
            Verdict::Warn,
            format!("$lookup {} missing display/name (accepted)", target.label),
        );
    }
    Ok(())
}
