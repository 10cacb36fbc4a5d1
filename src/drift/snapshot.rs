//! Baseline snapshot capture over a golden corpus.
//!
//! A snapshot is a labeled, timestamped record of artifact validation
//! outputs over a fixed corpus (`<corpus>/valid/*.json` and
//! `<corpus>/invalid/*.json`). Snapshots are immutable once captured and
//! compared pairwise by the drift detector; the capture itself is the only
//! place validators and snapshots meet.

use crate::core::artifact::{validate_artifact, Artifact};
use crate::core::error::GavelError;
use crate::core::gitmeta;
use crate::core::resolver::{ErrorRegistry, MappingRegistry};
use crate::core::schema::SchemaChecker;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment override for deterministic capture in tests and CI.
pub const FIXED_TIMESTAMP_ENV: &str = "GAVEL_FIXED_TIMESTAMP";

/// Recorded output for one corpus file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusEntry {
    pub errors: Vec<String>,
    pub artifact_id: String,
}

/// Validation outputs keyed by filename, per expectation category.
///
/// BTreeMaps keep serialization order stable so captures are byte-comparable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotResults {
    #[serde(default)]
    pub valid: BTreeMap<String, CorpusEntry>,
    #[serde(default)]
    pub invalid: BTreeMap<String, CorpusEntry>,
}

/// A captured corpus validation record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub snapshot_id: String,
    pub git_sha: String,
    pub timestamp: String,
    pub schema_version: String,
    pub results: SnapshotResults,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Snapshot, GavelError> {
        if !path.is_file() {
            return Err(GavelError::NotFound(path.display().to_string()));
        }
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Validate every corpus file and assemble a snapshot.
///
/// Snapshot identity defaults to the short (8-char) commit hash; a caller
/// can pass an explicit label instead. Corpus files are visited in sorted
/// order and results keyed by filename, so repeated captures over the same
/// tree differ only where validation outputs differ.
pub fn capture_snapshot(
    corpus_dir: &Path,
    schema: &SchemaChecker,
    mappings: &MappingRegistry,
    registry: &ErrorRegistry,
    snapshot_name: Option<&str>,
) -> Result<Snapshot, GavelError> {
    if !corpus_dir.is_dir() {
        return Err(GavelError::NotFound(corpus_dir.display().to_string()));
    }

    let mut results = SnapshotResults::default();
    for (category, bucket) in [
        ("valid", &mut results.valid),
        ("invalid", &mut results.invalid),
    ] {
        let dir = corpus_dir.join(category);
        if !dir.is_dir() {
            continue;
        }
        for path in sorted_json_files(&dir)? {
            let raw = fs::read_to_string(&path)?;
            let document: Value = serde_json::from_str(&raw)?;
            let errors = validate_artifact(&document, schema, mappings, registry, None, None);
            let artifact = Artifact::from_value(&document);
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string)
                .ok_or_else(|| GavelError::PathError(path.display().to_string()))?;
            bucket.insert(
                file_name,
                CorpusEntry {
                    errors,
                    artifact_id: artifact.id,
                },
            );
        }
    }

    let git_sha = gitmeta::head_sha(corpus_dir);
    let snapshot_id = snapshot_name
        .map(str::to_string)
        .unwrap_or_else(|| git_sha.chars().take(8).collect());
    let timestamp = match std::env::var(FIXED_TIMESTAMP_ENV) {
        Ok(fixed) => fixed,
        Err(_) => gitmeta::head_timestamp(corpus_dir),
    };

    Ok(Snapshot {
        snapshot_id,
        git_sha,
        timestamp,
        schema_version: crate::core::assets::SCHEMA_VERSION.to_string(),
        results,
    })
}

/// Persist a snapshot as `snapshot-<id>.json` under `output_dir`.
pub fn write_snapshot(snapshot: &Snapshot, output_dir: &Path) -> Result<PathBuf, GavelError> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(format!("snapshot-{}.json", snapshot.snapshot_id));
    let mut rendered = serde_json::to_string_pretty(snapshot)?;
    rendered.push('\n');
    fs::write(&path, rendered)?;
    Ok(path)
}

fn sorted_json_files(dir: &Path) -> Result<Vec<PathBuf>, GavelError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assets;
    use tempfile::TempDir;

    fn fixtures() -> (SchemaChecker, MappingRegistry, ErrorRegistry) {
        let schema_doc: Value = serde_json::from_str(assets::EMBEDDED_ARTIFACT_SCHEMA).unwrap();
        (
            SchemaChecker::new(&schema_doc).unwrap(),
            serde_json::from_str(assets::EMBEDDED_MAPPINGS).unwrap(),
            serde_json::from_str(assets::EMBEDDED_ERR_REGISTRY).unwrap(),
        )
    }

    fn seed_corpus(root: &Path) {
        fs::create_dir_all(root.join("valid")).unwrap();
        fs::create_dir_all(root.join("invalid")).unwrap();
        fs::write(
            root.join("valid/clean.json"),
            r#"{"id": "a-1", "domain": "d", "class": "unmapped", "instance": "i"}"#,
        )
        .unwrap();
        fs::write(
            root.join("invalid/missing-domain.json"),
            r#"{"id": "a-2", "class": "10"}"#,
        )
        .unwrap();
    }

    #[test]
    fn capture_records_outputs_per_category() {
        let tmp = TempDir::new().unwrap();
        seed_corpus(tmp.path());
        let (schema, mappings, registry) = fixtures();

        let snapshot =
            capture_snapshot(tmp.path(), &schema, &mappings, &registry, Some("test")).unwrap();

        assert_eq!(snapshot.snapshot_id, "test");
        assert_eq!(snapshot.schema_version, "v1.0.0");
        let clean = &snapshot.results.valid["clean.json"];
        assert!(clean.errors.is_empty());
        assert_eq!(clean.artifact_id, "a-1");
        let broken = &snapshot.results.invalid["missing-domain.json"];
        assert_eq!(broken.errors, vec!["ERR-SCHEMA-001".to_string()]);
    }

    #[test]
    fn write_then_load_round_trips() {
        let tmp = TempDir::new().unwrap();
        seed_corpus(tmp.path());
        let (schema, mappings, registry) = fixtures();

        let snapshot =
            capture_snapshot(tmp.path(), &schema, &mappings, &registry, Some("rt")).unwrap();
        let path = write_snapshot(&snapshot, &tmp.path().join("out")).unwrap();
        assert!(path.ends_with("snapshot-rt.json"));

        let loaded = Snapshot::load(&path).unwrap();
        assert_eq!(loaded.snapshot_id, snapshot.snapshot_id);
        assert_eq!(loaded.results.valid, snapshot.results.valid);
        assert_eq!(loaded.results.invalid, snapshot.results.invalid);
    }

    #[test]
    fn missing_corpus_dir_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let (schema, mappings, registry) = fixtures();
        let missing = tmp.path().join("nope");
        let err = capture_snapshot(&missing, &schema, &mappings, &registry, None).unwrap_err();
        assert!(matches!(err, GavelError::NotFound(_)));
    }
}
