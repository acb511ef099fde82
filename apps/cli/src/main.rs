//! `glossa` - terminology server smoke checks and package assembly.
//!
//! Check commands print one tagged line per event on stdout and exit 0 only
//! when every required check passed; diagnostics go to stderr via tracing
//! (`RUST_LOG`, or `DEBUG=1` for the debug filter).

mod config;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use glossa_checks::scenarios::code_systems::{self, CodeSystemCheck};
use glossa_checks::scenarios::concept_maps::{self, ConceptMapCheck, DEFAULT_NAME_PREFIX};
use glossa_checks::scenarios::value_sets::{
    self, ValueSetCheck, DEFAULT_EXPECTED_TOTAL, DEFAULT_PAGE_SIZE,
};
use glossa_checks::{FatalError, Reporter, RunSummary};
use glossa_package::{build_archive, scan_directory, PackageManifest, ResourceEntry};
use glossa_terminology_client::TerminologyClient;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "glossa",
    version,
    about = "FHIR terminology server smoke checks and package assembly"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run smoke checks against a terminology server
    #[command(subcommand)]
    Check(CheckCommand),
    /// Assemble FHIR resource files into a terminology package
    #[command(subcommand)]
    Package(PackageCommand),
}

#[derive(Subcommand)]
enum CheckCommand {
    /// Verify prefixed ConceptMaps translate their first source concept
    ConceptMaps(ConceptMapArgs),
    /// Verify every ValueSet expands to at least one concept
    ValueSets(ValueSetArgs),
    /// Verify the code-system roster is present and answers $lookup
    CodeSystems(CodeSystemArgs),
}

#[derive(Args)]
struct ConceptMapArgs {
    /// Server base URL (falls back to BASE_URL, then the local default)
    base_url: Option<String>,

    /// Name prefix selecting the maps to verify (env NAME_PREFIX)
    #[arg(long)]
    prefix: Option<String>,

    #[command(flatten)]
    transport: TransportArgs,
}

#[derive(Args)]
struct ValueSetArgs {
    /// Server base URL (falls back to BASE_URL, then the local default)
    base_url: Option<String>,

    /// Exact number of ValueSets the server must hold (env EXPECTED_TOTAL)
    #[arg(long)]
    expected_total: Option<usize>,

    /// `_count` hint for listing pages
    #[arg(long)]
    page_size: Option<u32>,

    #[command(flatten)]
    transport: TransportArgs,
}

#[derive(Args)]
struct CodeSystemArgs {
    /// Server base URL
    base_url: String,

    /// Override for the LOCAL roster entry's system URL (env CS_LOCAL)
    local_system: Option<String>,

    /// Override for the LOCAL roster entry's code (env CODE_LOCAL)
    local_code: Option<String>,

    #[command(flatten)]
    transport: TransportArgs,
}

/// Shared transport knobs; each falls back to its environment variable.
#[derive(Args)]
pub struct TransportArgs {
    /// Request timeout in seconds (env TIMEOUT)
    #[arg(long)]
    pub timeout: Option<f64>,

    /// Extra attempts per request (env RETRIES)
    #[arg(long)]
    pub retries: Option<u32>,

    /// Pause between attempts in seconds (env RETRY_DELAY)
    #[arg(long)]
    pub retry_delay: Option<f64>,
}

#[derive(Subcommand)]
enum PackageCommand {
    /// Build a `.tgz` package from a directory of FHIR resource files
    Build(PackageBuildArgs),
}

#[derive(Args)]
struct PackageBuildArgs {
    /// Directory holding the FHIR resource JSON files
    #[arg(short = 'd', long)]
    directory: PathBuf,

    /// Output archive path (default: <directory>/<name>.tgz)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Package name, e.g. `giis.fhir.package`
    #[arg(long)]
    name: String,

    /// Package version (default: today's date as YYYY.MM.DD)
    #[arg(long)]
    version: Option<String>,

    /// Package author
    #[arg(long)]
    author: String,

    /// Package description
    #[arg(long)]
    description: Option<String>,

    /// Canonical/homepage URL recorded in the manifest
    #[arg(long)]
    url: Option<String>,

    /// FHIR version recorded in the manifest
    #[arg(long, default_value = "4.0.1")]
    fhir_version: String,
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            println!("[FAIL] {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let default_filter = if config::debug_enabled() {
        "glossa=debug"
    } else {
        "glossa=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Command::Check(CheckCommand::ConceptMaps(args)) => check_concept_maps(args),
        Command::Check(CheckCommand::ValueSets(args)) => check_value_sets(args),
        Command::Check(CheckCommand::CodeSystems(args)) => check_code_systems(args),
        Command::Package(PackageCommand::Build(args)) => package_build(args),
    }
}

fn check_concept_maps(args: ConceptMapArgs) -> anyhow::Result<ExitCode> {
    let client = client(args.base_url, &args.transport)?;
    let options = ConceptMapCheck {
        prefix: config::string_setting(args.prefix, "NAME_PREFIX")
            .unwrap_or_else(|| DEFAULT_NAME_PREFIX.to_string()),
    };
    run_scenario(|report| concept_maps::run(&client, report, &options))
}

fn check_value_sets(args: ValueSetArgs) -> anyhow::Result<ExitCode> {
    let client = client(args.base_url, &args.transport)?;
    let options = ValueSetCheck {
        expected_total: config::parsed_setting(args.expected_total, "EXPECTED_TOTAL")?
            .unwrap_or(DEFAULT_EXPECTED_TOTAL),
        page_size: args.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
    };
    run_scenario(|report| value_sets::run(&client, report, &options))
}

fn check_code_systems(args: CodeSystemArgs) -> anyhow::Result<ExitCode> {
    let client = client(Some(args.base_url), &args.transport)?;
    let options: CodeSystemCheck = config::code_system_check(args.local_system, args.local_code);
    run_scenario(|report| code_systems::run(&client, report, &options))
}

fn client(base_url: Option<String>, transport: &TransportArgs) -> anyhow::Result<TerminologyClient> {
    let config = config::client_config(config::base_url(base_url), transport)?;
    Ok(TerminologyClient::new(config)?)
}

/// Run one scenario with a stdout reporter and map the outcome to an exit
/// code: fatal errors print a single `[FAIL]` line, per-record failures are
/// already printed and only decide the code.
fn run_scenario<F>(scenario: F) -> anyhow::Result<ExitCode>
where
    F: FnOnce(&mut Reporter<'_>) -> Result<RunSummary, FatalError>,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut report = Reporter::new(&mut out);
    match scenario(&mut report) {
        Ok(summary) if summary.has_failures() => Ok(ExitCode::FAILURE),
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(fatal) => {
            report.fail(&fatal);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn package_build(args: PackageBuildArgs) -> anyhow::Result<ExitCode> {
    let outcome = scan_directory(&args.directory)
        .with_context(|| format!("failed to scan {}", args.directory.display()))?;
    for skipped in &outcome.skipped {
        println!("[WARN] skipping {}: {}", skipped.path.display(), skipped.reason);
    }
    anyhow::ensure!(
        !outcome.resources.is_empty(),
        "no FHIR resource files found under {}",
        args.directory.display()
    );

    let version = args
        .version
        .unwrap_or_else(|| Local::now().format("%Y.%m.%d").to_string());
    let mut manifest = PackageManifest::new(args.name.clone(), version, args.author);
    manifest.description = args.description.unwrap_or_default();
    manifest.url = args.url;
    manifest.fhir_version = Some(args.fhir_version);
    manifest.resources = outcome
        .resources
        .iter()
        .map(ResourceEntry::reference)
        .collect();

    let output = args
        .output
        .unwrap_or_else(|| args.directory.join(format!("{}.tgz", args.name)));
    build_archive(&args.directory, &manifest, &outcome.resources, &output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!("[OK] package created: {}", output.display());
    println!("[INFO] contents:");
    println!("  package/package.json");
    println!("  package/.index.json");
    for resource in &outcome.resources {
        println!("  package/{}", resource.relative_path);
    }
    Ok(ExitCode::SUCCESS)
}
