//! Connectivity probe.

use crate::error::FatalError;
use crate::gateway::TerminologyApi;
use crate::report::Reporter;
use glossa_models::CapabilityStatement;

/// Fail-fast precondition: the server must answer `/metadata` with a
/// CapabilityStatement before any other stage runs.
pub fn probe(api: &dyn TerminologyApi, report: &mut Reporter<'_>) -> Result<(), FatalError> {
    let fatal = || FatalError::Probe {
        base: api.base_url().to_string(),
    };

    let value = match api.capability() {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(base = api.base_url(), error = %err, "capability query failed");
            return Err(fatal());
        }
    };

    let capability: CapabilityStatement =
        glossa_models::parse_resource(&value, "CapabilityStatement").map_err(|_| fatal())?;

    match capability.software_label() {
        Some(software) => report.ok(format!("metadata at {} ({software})", api.base_url())),
        None => report.ok(format!("metadata at {}", api.base_url())),
    }
    Ok(())
}
