//! Snapshot capture and drift comparison over a real corpus tree.

use gavel::core::assets;
use gavel::core::resolver::{ErrorRegistry, MappingRegistry};
use gavel::core::schema::SchemaChecker;
use gavel::drift::compare::{compare_snapshots, DriftType};
use gavel::drift::snapshot::{capture_snapshot, write_snapshot, Snapshot};
use serde_json::Value;
use std::fs;
use std::path::Path;
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
        r#"{"id": "a-1", "domain": "payments", "class": "unmapped", "instance": "i-1"}"#,
    )
    .unwrap();
    fs::write(
        root.join("valid/escalated.json"),
        r#"{"id": "a-2", "domain": "payments", "class": "22", "instance": "i-2"}"#,
    )
    .unwrap();
    fs::write(
        root.join("invalid/malformed.json"),
        r#"{"id": "a-3"}"#,
    )
    .unwrap();
}

#[test]
fn snapshot_compared_with_itself_has_no_drift() {
    let tmp = TempDir::new().unwrap();
    seed_corpus(tmp.path());
    let (schema, mappings, registry) = fixtures();

    let snapshot =
        capture_snapshot(tmp.path(), &schema, &mappings, &registry, Some("base")).unwrap();
    let report = compare_snapshots(&snapshot, &snapshot.clone());

    assert!(!report.has_drift());
    assert!(!report.has_breaking_drift());
    assert!(report.drift_items.is_empty());
}

#[test]
fn recapturing_an_unchanged_corpus_produces_identical_results() {
    let tmp = TempDir::new().unwrap();
    seed_corpus(tmp.path());
    let (schema, mappings, registry) = fixtures();

    let first = capture_snapshot(tmp.path(), &schema, &mappings, &registry, Some("a")).unwrap();
    let second = capture_snapshot(tmp.path(), &schema, &mappings, &registry, Some("b")).unwrap();

    let report = compare_snapshots(&first, &second);
    assert!(!report.has_drift(), "{:?}", report.drift_items);
}

#[test]
fn changed_validation_output_is_breaking_drift() {
    let tmp = TempDir::new().unwrap();
    seed_corpus(tmp.path());
    let (schema, mappings, registry) = fixtures();

    let baseline =
        capture_snapshot(tmp.path(), &schema, &mappings, &registry, Some("base")).unwrap();

    // The previously clean artifact now loses a required field.
    fs::write(tmp.path().join("valid/clean.json"), r#"{"id": "a-1"}"#).unwrap();
    let current =
        capture_snapshot(tmp.path(), &schema, &mappings, &registry, Some("curr")).unwrap();

    let report = compare_snapshots(&baseline, &current);
    assert!(report.has_breaking_drift());
    let item = report
        .drift_items
        .iter()
        .find(|i| i.file_name == "clean.json")
        .unwrap();
    assert_eq!(item.drift_type, DriftType::EncodingChange);
    assert_eq!(item.category, "valid");
    assert_eq!(item.baseline_errors.as_deref(), Some(&[][..]));
    assert_eq!(
        item.current_errors.as_deref(),
        Some(&["ERR-SCHEMA-001".to_string()][..])
    );
}

#[test]
fn corpus_membership_changes_are_non_breaking() {
    let tmp = TempDir::new().unwrap();
    seed_corpus(tmp.path());
    let (schema, mappings, registry) = fixtures();

    let baseline =
        capture_snapshot(tmp.path(), &schema, &mappings, &registry, Some("base")).unwrap();

    fs::remove_file(tmp.path().join("valid/clean.json")).unwrap();
    fs::write(
        tmp.path().join("invalid/new-case.json"),
        r#"{"id": "a-9"}"#,
    )
    .unwrap();
    let current =
        capture_snapshot(tmp.path(), &schema, &mappings, &registry, Some("curr")).unwrap();

    let report = compare_snapshots(&baseline, &current);
    assert!(report.has_drift());
    assert!(!report.has_breaking_drift());

    let kinds: Vec<DriftType> = report.drift_items.iter().map(|i| i.drift_type).collect();
    assert!(kinds.contains(&DriftType::RemovedCorpusFile));
    assert!(kinds.contains(&DriftType::NewCorpusFile));
}

#[test]
fn persisted_snapshots_survive_the_round_trip_through_disk() {
    let tmp = TempDir::new().unwrap();
    seed_corpus(tmp.path());
    let (schema, mappings, registry) = fixtures();

    let snapshot =
        capture_snapshot(tmp.path(), &schema, &mappings, &registry, Some("disk")).unwrap();
    let out_dir = tmp.path().join("snapshots");
    let path = write_snapshot(&snapshot, &out_dir).unwrap();

    let loaded = Snapshot::load(&path).unwrap();
    let report = compare_snapshots(&snapshot, &loaded);
    assert!(!report.has_drift());
}

#[test]
fn fixed_timestamp_env_overrides_capture_time() {
    let tmp = TempDir::new().unwrap();
    seed_corpus(tmp.path());
    let (schema, mappings, registry) = fixtures();

    // Env mutation is process-global; restore afterwards.
    std::env::set_var("GAVEL_FIXED_TIMESTAMP", "2026-01-01T00:00:00+00:00");
    let snapshot =
        capture_snapshot(tmp.path(), &schema, &mappings, &registry, Some("fixed")).unwrap();
    std::env::remove_var("GAVEL_FIXED_TIMESTAMP");

    assert_eq!(snapshot.timestamp, "2026-01-01T00:00:00+00:00");
}
