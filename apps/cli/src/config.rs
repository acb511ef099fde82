//! Argument / environment / default resolution.
//!
//! Precedence everywhere: explicit argument, then environment variable,
//! then built-in default. Settings are resolved once into immutable
//! structs; nothing reads the environment after startup.

use anyhow::Context;
use glossa_checks::scenarios::code_systems::CodeSystemCheck;
use glossa_terminology_client::ClientConfig;
use std::env;
use std::time::Duration;

use crate::TransportArgs;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8180/fhir";

/// `DEBUG=1` switches the default log filter to debug.
pub fn debug_enabled() -> bool {
    env::var("DEBUG")
        .ok()
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .is_some_and(|level| level > 0)
}

/// Argument first, then the environment variable; blank values count as
/// unset.
pub fn string_setting(arg: Option<String>, var: &str) -> Option<String> {
    arg.or_else(|| env::var(var).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn base_url(arg: Option<String>) -> String {
    string_setting(arg, "BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

/// Argument first, then the parsed environment variable. A present but
/// unparseable variable is an error, not a silent default.
pub fn parsed_setting<T: std::str::FromStr>(arg: Option<T>, var: &str) -> anyhow::Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    if arg.is_some() {
        return Ok(arg);
    }
    match env::var(var) {
        Ok(raw) => {
            let parsed = raw
                .trim()
                .parse::<T>()
                .with_context(|| format!("invalid {var}: '{raw}'"))?;
            Ok(Some(parsed))
        }
        Err(_) => Ok(None),
    }
}

pub fn client_config(base_url: String, transport: &TransportArgs) -> anyhow::Result<ClientConfig> {
    let mut config = ClientConfig::new(base_url);
    if let Some(seconds) = parsed_setting(transport.timeout, "TIMEOUT")? {
        anyhow::ensure!(
            seconds.is_finite() && seconds > 0.0,
            "timeout must be a positive number of seconds"
        );
        config.timeout = Duration::from_secs_f64(seconds);
    }
    if let Some(retries) = parsed_setting(transport.retries, "RETRIES")? {
        config.retries = retries;
    }
    if let Some(seconds) = parsed_setting(transport.retry_delay, "RETRY_DELAY")? {
        anyhow::ensure!(
            seconds.is_finite() && seconds >= 0.0,
            "retry delay must be a non-negative number of seconds"
        );
        config.retry_delay = Duration::from_secs_f64(seconds);
    }
    Ok(config)
}

/// The code-system roster with per-entry `CS_*`/`CODE_*` environment
/// overrides; the LOCAL entry additionally honors the positional overrides.
pub fn code_system_check(
    local_system: Option<String>,
    local_code: Option<String>,
) -> CodeSystemCheck {
    let mut check = CodeSystemCheck::default();
    for target in &mut check.targets {
        let key = target.label.replace('-', "");
        if let Some(system) = string_setting(None, &format!("CS_{key}")) {
            target.system = system;
        }
        if let Some(code) = string_setting(None, &format!("CODE_{key}")) {
            target.code = code;
        }
        if target.label == "LOCAL" {
            if let Some(system) = local_system.clone() {
                target.system = system;
            }
            if let Some(code) = local_code.clone() {
                target.code = code;
            }
        }
    }
    check
}
