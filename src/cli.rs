//! CLI struct definitions for the Gavel command-line interface.
//!
//! All clap-derived types live here. Dispatch logic lives in `lib.rs`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "gavel",
    version = env!("CARGO_PKG_VERSION"),
    about = "Gavel is the governance substrate that validates service contracts and emitted artifacts against schemas and semantic rules, and gates CI on validation drift."
)]
pub(crate) struct Cli {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Validate a contract unit file and write a validation report
    ValidateContract(ValidateContractCli),
    /// Validate a single artifact and print its resolved error codes
    ValidateArtifact(ValidateArtifactCli),
    /// Snapshot capture and drift comparison for CI gating
    Drift(DriftCli),
    /// Print the gavel version
    Version,
}

#[derive(clap::Args, Debug)]
pub(crate) struct ValidateContractCli {
    /// Path to the contract unit JSON file.
    pub contract_path: PathBuf,
    /// Output path for the validation report.
    #[clap(short, long, default_value = "contract_report.json")]
    pub output: PathBuf,
    /// Contract schema to validate against (defaults to the embedded v1.0.0 schema).
    #[clap(long)]
    pub schema: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub(crate) struct ValidateArtifactCli {
    /// Path to the artifact JSON file.
    pub artifact_path: PathBuf,
    /// Artifact schema to validate against (defaults to the embedded v1.0.0 schema).
    #[clap(long)]
    pub schema: Option<PathBuf>,
    /// Subclass-to-failure-mode mapping registry (defaults to the embedded registry).
    #[clap(long)]
    pub mappings: Option<PathBuf>,
    /// Error-code registry (defaults to the embedded registry).
    #[clap(long)]
    pub registry: Option<PathBuf>,
    /// Append validator events to this JSONL file.
    #[clap(long)]
    pub events: Option<PathBuf>,
    /// Correlation id attached to emitted events (generated when omitted).
    #[clap(long)]
    pub correlation_id: Option<String>,
}

#[derive(clap::Args, Debug)]
pub(crate) struct DriftCli {
    #[clap(subcommand)]
    pub command: DriftCommand,
}

#[derive(Subcommand, Debug)]
pub(crate) enum DriftCommand {
    /// Capture a baseline snapshot of corpus validation outputs
    Capture {
        /// Corpus directory containing valid/ and invalid/ subdirectories.
        #[clap(long)]
        corpus: PathBuf,
        /// Directory snapshots are written to.
        #[clap(long, default_value = "artifacts/corpus_snapshots")]
        out: PathBuf,
        /// Snapshot label (defaults to the short commit hash).
        #[clap(long)]
        name: Option<String>,
        /// Artifact schema (defaults to the embedded v1.0.0 schema).
        #[clap(long)]
        schema: Option<PathBuf>,
        /// Mapping registry (defaults to the embedded registry).
        #[clap(long)]
        mappings: Option<PathBuf>,
        /// Error-code registry (defaults to the embedded registry).
        #[clap(long)]
        registry: Option<PathBuf>,
    },
    /// Compare two snapshots and gate on breaking drift
    Compare {
        /// Baseline snapshot file.
        baseline: PathBuf,
        /// Current snapshot file.
        current: PathBuf,
        /// Directory the JSON drift report is written to (defaults next to `current`).
        #[clap(long)]
        out: Option<PathBuf>,
    },
}
