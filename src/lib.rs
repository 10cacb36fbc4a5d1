//! Gavel: a governance substrate for contract and artifact validation.
//!
//! Gavel validates two kinds of structured documents and detects drift
//! between validation runs for CI regression gating:
//!
//! - **Contracts**: service-level policy units describing failure handling,
//!   compatibility, and artifact shape. Validated against a JSON Schema and
//!   then against cross-field semantic rules (failure-graph invariants,
//!   metadata/version consistency, governance smells).
//! - **Artifacts**: runtime-emitted objects classified by failure-mode
//!   mappings and resolved to error codes under FM30 dominance.
//! - **Drift**: snapshots capture artifact validation outputs over a fixed
//!   corpus; comparing two snapshots classifies membership changes as
//!   non-breaking and output changes as breaking, gating CI with a non-zero
//!   exit.
//!
//! # Design rules
//!
//! - Validators return structured results; bad input documents are never
//!   exceptions.
//! - Resolution output is sorted and deduplicated so repeated runs are
//!   byte-identical.
//! - Observability is side-channel only: the result exists before any event
//!   sink runs, and sink faults are swallowed.
//!
//! # Crate structure
//!
//! - [`core`]: validation engine (schema collaborator, failure graph,
//!   resolver, contract/artifact pipelines, observability)
//! - [`drift`]: snapshot capture and comparison

pub mod core;
pub mod drift;

mod cli;

use crate::cli::{Cli, Command, DriftCommand, ValidateArtifactCli, ValidateContractCli};
use crate::core::contract::validate_contract;
use crate::core::error::GavelError;
use crate::core::observability::{new_correlation_id, JsonlSink};
use crate::core::resolver::{ErrorRegistry, MappingRegistry};
use crate::core::schema::SchemaChecker;
use crate::core::{artifact, assets, output, report};
use crate::drift::compare::compare_snapshots;
use crate::drift::snapshot::{capture_snapshot, write_snapshot, Snapshot};
use clap::Parser;
use colored::Colorize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Parse arguments, run the requested command, and return the process exit
/// code. I/O-level faults surface as `GavelError` and are mapped to their
/// exit codes by `main`.
pub fn run() -> Result<i32, GavelError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Version => {
            println!("v{}", env!("CARGO_PKG_VERSION"));
            Ok(0)
        }
        Command::ValidateContract(args) => run_validate_contract(&args),
        Command::ValidateArtifact(args) => run_validate_artifact(&args),
        Command::Drift(drift_cli) => match drift_cli.command {
            DriftCommand::Capture {
                corpus,
                out,
                name,
                schema,
                mappings,
                registry,
            } => run_drift_capture(
                &corpus,
                &out,
                name.as_deref(),
                schema.as_deref(),
                mappings.as_deref(),
                registry.as_deref(),
            ),
            DriftCommand::Compare {
                baseline,
                current,
                out,
            } => run_drift_compare(&baseline, &current, out.as_deref()),
        },
    }
}

fn run_validate_contract(args: &ValidateContractCli) -> Result<i32, GavelError> {
    let document = load_json_file(&args.contract_path)?;
    let schema_doc = load_resource(args.schema.as_deref(), assets::EMBEDDED_CONTRACT_SCHEMA)?;
    let schema = SchemaChecker::new(&schema_doc)?;

    let verdict = validate_contract(&document, &schema);

    let service_name = document
        .get("service_name")
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    let environments: Vec<String> = document
        .pointer("/metadata/compatibility/environments")
        .and_then(Value::as_array)
        .map(|envs| {
            envs.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let validation_report = report::generate_report(service_name, &verdict, &environments);
    write_json_file(&args.output, &serde_json::to_value(&validation_report)?)
        .map_err(|e| GavelError::ReportWriteError(e.to_string()))?;
    println!("Validation report written to: {}", args.output.display());

    println!("\nService: {}", service_name);
    println!(
        "Status: {}",
        validation_report.validation_status.to_uppercase()
    );
    if !verdict.errors.is_empty() {
        println!("\nErrors ({}):", verdict.errors.len());
        println!("{}", output::numbered_list(&verdict.errors));
    }
    if !verdict.warnings.is_empty() {
        println!("\nWarnings ({}):", verdict.warnings.len());
        println!("{}", output::numbered_list(&verdict.warnings));
    }

    if verdict.is_valid {
        println!("\n{}", "Contract validation PASSED".green());
        Ok(0)
    } else {
        println!("\n{}", "Contract validation FAILED".red());
        Ok(1)
    }
}

fn run_validate_artifact(args: &ValidateArtifactCli) -> Result<i32, GavelError> {
    let document = load_json_file(&args.artifact_path)?;
    let schema_doc = load_resource(args.schema.as_deref(), assets::EMBEDDED_ARTIFACT_SCHEMA)?;
    let schema = SchemaChecker::new(&schema_doc)?;
    let mappings: MappingRegistry =
        serde_json::from_value(load_resource(args.mappings.as_deref(), assets::EMBEDDED_MAPPINGS)?)?;
    let registry: ErrorRegistry = serde_json::from_value(load_resource(
        args.registry.as_deref(),
        assets::EMBEDDED_ERR_REGISTRY,
    )?)?;

    let correlation_id = args
        .correlation_id
        .clone()
        .unwrap_or_else(new_correlation_id);

    let error_codes = match &args.events {
        Some(events_path) => {
            let file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(events_path)?;
            let mut sink = JsonlSink::new(file);
            artifact::validate_artifact(
                &document,
                &schema,
                &mappings,
                &registry,
                Some(&mut sink),
                Some(correlation_id),
            )
        }
        None => artifact::validate_artifact(
            &document,
            &schema,
            &mappings,
            &registry,
            None,
            Some(correlation_id),
        ),
    };

    if error_codes.is_empty() {
        println!("{}", "Artifact validation PASSED".green());
        Ok(0)
    } else {
        println!("{}", "Artifact validation FAILED".red());
        for code in &error_codes {
            println!("  {}", code);
        }
        Ok(1)
    }
}

fn run_drift_capture(
    corpus: &Path,
    out: &Path,
    name: Option<&str>,
    schema: Option<&Path>,
    mappings: Option<&Path>,
    registry: Option<&Path>,
) -> Result<i32, GavelError> {
    let schema_doc = load_resource(schema, assets::EMBEDDED_ARTIFACT_SCHEMA)?;
    let schema = SchemaChecker::new(&schema_doc)?;
    let mappings: MappingRegistry =
        serde_json::from_value(load_resource(mappings, assets::EMBEDDED_MAPPINGS)?)?;
    let registry: ErrorRegistry =
        serde_json::from_value(load_resource(registry, assets::EMBEDDED_ERR_REGISTRY)?)?;

    let snapshot = capture_snapshot(corpus, &schema, &mappings, &registry, name)?;
    let path = write_snapshot(&snapshot, out)?;
    println!("Baseline captured: {}", path.display());
    Ok(0)
}

fn run_drift_compare(
    baseline_path: &Path,
    current_path: &Path,
    out: Option<&Path>,
) -> Result<i32, GavelError> {
    let baseline = Snapshot::load(baseline_path)?;
    let current = Snapshot::load(current_path)?;

    let drift_report = compare_snapshots(&baseline, &current);
    println!("{}", drift_report.to_markdown());

    let report_dir = match out {
        Some(dir) => dir.to_path_buf(),
        None => current_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    fs::create_dir_all(&report_dir)?;
    let report_path = report_dir.join(format!("drift-report-{}.json", drift_report.current_id));
    write_json_file(&report_path, &drift_report.to_json())
        .map_err(|e| GavelError::ReportWriteError(e.to_string()))?;
    println!("JSON report saved: {}", report_path.display());

    // CI gate: breaking drift fails the build.
    if drift_report.has_breaking_drift() {
        Ok(1)
    } else {
        Ok(0)
    }
}

fn load_json_file(path: &Path) -> Result<Value, GavelError> {
    if !path.is_file() {
        return Err(GavelError::NotFound(path.display().to_string()));
    }
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Load an on-disk resource when a path is given, the embedded default
/// otherwise. Embedded resources are compile-time validated by tests, so a
/// decode failure here means a caller-supplied file is malformed.
fn load_resource(path: Option<&Path>, embedded: &str) -> Result<Value, GavelError> {
    match path {
        Some(path) => load_json_file(path),
        None => Ok(serde_json::from_str(embedded)?),
    }
}

fn write_json_file(path: &Path, value: &Value) -> Result<(), GavelError> {
    let mut rendered = serde_json::to_string_pretty(value)?;
    rendered.push('\n');
    fs::write(path, rendered)?;
    Ok(())
}
