//! Snapshot comparison and drift classification.
//!
//! Compares two snapshots of validation outputs over the same corpus and
//! classifies every difference. Corpus membership changes are non-breaking;
//! any output change on a shared file is breaking and gates CI.

use crate::drift::snapshot::{CorpusEntry, Snapshot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kinds of drift the detector can record.
///
/// `SemanticChange` exists in the wire format but is never produced by the
/// comparison as written: every output difference on a shared file is
/// classified as `EncodingChange`. The variant stays so historical reports
/// and downstream consumers keep a stable vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftType {
    EncodingChange,
    SemanticChange,
    NewCorpusFile,
    RemovedCorpusFile,
}

impl DriftType {
    pub fn is_breaking(self) -> bool {
        matches!(self, DriftType::EncodingChange | DriftType::SemanticChange)
    }

    pub fn label(self) -> &'static str {
        match self {
            DriftType::EncodingChange => "encoding_change",
            DriftType::SemanticChange => "semantic_change",
            DriftType::NewCorpusFile => "new_corpus_file",
            DriftType::RemovedCorpusFile => "removed_corpus_file",
        }
    }
}

/// One detected difference between two snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftItem {
    pub drift_type: DriftType,
    pub file_name: String,
    pub category: String,
    pub baseline_errors: Option<Vec<String>>,
    pub current_errors: Option<Vec<String>>,
    pub description: String,
}

/// Aggregated drift for one baseline/current pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftReport {
    pub baseline_id: String,
    pub current_id: String,
    pub drift_items: Vec<DriftItem>,
}

impl DriftReport {
    pub fn has_drift(&self) -> bool {
        !self.drift_items.is_empty()
    }

    pub fn has_breaking_drift(&self) -> bool {
        self.drift_items
            .iter()
            .any(|item| item.drift_type.is_breaking())
    }

    /// Machine form for CI consumption. Field order and item order are
    /// deterministic for a given snapshot pair.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "baseline_id": self.baseline_id,
            "current_id": self.current_id,
            "has_drift": self.has_drift(),
            "has_breaking_drift": self.has_breaking_drift(),
            "drift_count": self.drift_items.len(),
            "drift_items": self.drift_items,
        })
    }

    /// Human-readable summary for PR comments and terminal output.
    pub fn to_markdown(&self) -> String {
        let mut lines = vec![
            "## Validation Drift Report".to_string(),
            String::new(),
            format!("**Baseline:** `{}`", self.baseline_id),
            format!("**Current:** `{}`", self.current_id),
            String::new(),
        ];

        if !self.has_drift() {
            lines.push("No drift detected - all corpus outputs match baseline.".to_string());
            lines.push(String::new());
            return lines.join("\n");
        }

        if self.has_breaking_drift() {
            lines.push("**Breaking drift detected** - corpus outputs have changed.".to_string());
        } else {
            lines.push("Non-breaking drift detected - corpus files added/removed.".to_string());
        }

        let mut counts: BTreeMap<DriftType, usize> = BTreeMap::new();
        for item in &self.drift_items {
            *counts.entry(item.drift_type).or_insert(0) += 1;
        }
        lines.extend([String::new(), "### Drift Summary".to_string(), String::new()]);
        for (drift_type, count) in &counts {
            lines.push(format!("- {}: {}", drift_type.label(), count));
        }

        lines.extend([String::new(), "### Detailed Changes".to_string(), String::new()]);
        for item in &self.drift_items {
            lines.push(format!("#### {}/{}", item.category, item.file_name));
            lines.push(format!("**Type:** {}", item.drift_type.label()));
            lines.push(format!("**Description:** {}", item.description));
            if let Some(baseline_errors) = &item.baseline_errors {
                lines.push(format!("**Baseline errors:** `{:?}`", baseline_errors));
            }
            if let Some(current_errors) = &item.current_errors {
                lines.push(format!("**Current errors:** `{:?}`", current_errors));
            }
            lines.push(String::new());
        }

        lines.join("\n")
    }
}

/// Compare two snapshots and classify every difference.
///
/// Each category (valid, invalid) is treated as an independent map keyed by
/// filename. Error lists are compared as ordered sequences, not sets;
/// validators emit sorted output, so ordering differences are real drift.
pub fn compare_snapshots(baseline: &Snapshot, current: &Snapshot) -> DriftReport {
    let mut report = DriftReport {
        baseline_id: baseline.snapshot_id.clone(),
        current_id: current.snapshot_id.clone(),
        drift_items: Vec::new(),
    };

    let categories: [(&str, &BTreeMap<String, CorpusEntry>, &BTreeMap<String, CorpusEntry>); 2] = [
        ("valid", &baseline.results.valid, &current.results.valid),
        ("invalid", &baseline.results.invalid, &current.results.invalid),
    ];

    for (category, baseline_results, current_results) in categories {
        for (file_name, baseline_entry) in baseline_results {
            if !current_results.contains_key(file_name) {
                report.drift_items.push(DriftItem {
                    drift_type: DriftType::RemovedCorpusFile,
                    file_name: file_name.clone(),
                    category: category.to_string(),
                    baseline_errors: Some(baseline_entry.errors.clone()),
                    current_errors: None,
                    description: format!("Corpus file removed from {} set", category),
                });
            }
        }

        for (file_name, current_entry) in current_results {
            if !baseline_results.contains_key(file_name) {
                report.drift_items.push(DriftItem {
                    drift_type: DriftType::NewCorpusFile,
                    file_name: file_name.clone(),
                    category: category.to_string(),
                    baseline_errors: None,
                    current_errors: Some(current_entry.errors.clone()),
                    description: format!("New corpus file added to {} set", category),
                });
            }
        }

        for (file_name, baseline_entry) in baseline_results {
            if let Some(current_entry) = current_results.get(file_name) {
                if baseline_entry.errors != current_entry.errors {
                    report.drift_items.push(DriftItem {
                        drift_type: DriftType::EncodingChange,
                        file_name: file_name.clone(),
                        category: category.to_string(),
                        baseline_errors: Some(baseline_entry.errors.clone()),
                        current_errors: Some(current_entry.errors.clone()),
                        description: format!(
                            "Validation output changed: baseline={:?}, current={:?}",
                            baseline_entry.errors, current_entry.errors
                        ),
                    });
                }
            }
        }
    }

    report
}
