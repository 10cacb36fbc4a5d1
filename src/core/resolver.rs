//! Failure-mode mapping lookup and error-code resolution.
//!
//! Two static registries drive artifact classification: a mapping table from
//! artifact subclass to failure-mode ids, and an error registry declaring
//! which failure modes each error code covers. Resolution applies the FM30
//! dominance rule: once the terminal escalation mode is present, only
//! escalation-tagged codes are surfaced.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// The terminal escalation failure mode. Its presence suppresses every
/// non-escalation error code.
pub const TERMINAL_ESCALATION_MODE: &str = "FM30";

/// Sentinel error code reported for schema non-conformant artifacts.
pub const SCHEMA_SENTINEL_CODE: &str = "ERR-SCHEMA-001";

/// Failure mode implied by schema non-conformance.
pub const SCHEMA_FAILURE_MODE: &str = "FM15";

/// Static table from artifact subclass key to its failure-mode ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MappingRegistry {
    #[serde(default)]
    pub mappings: BTreeMap<String, Vec<String>>,
}

/// One error-registry entry: an error code and the failure modes it covers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorRegistryEntry {
    pub id: String,
    pub fm: Vec<String>,
}

/// Static list of error codes keyed by covered failure modes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorRegistry {
    #[serde(default)]
    pub registry: Vec<ErrorRegistryEntry>,
}

/// Look up the failure-mode list for an artifact subclass.
///
/// An absent key is an empty list, not an error: unmapped subclasses simply
/// carry no failure modes.
pub fn resolve_failure_modes<'a>(subclass: &str, mappings: &'a MappingRegistry) -> &'a [String] {
    mappings
        .mappings
        .get(subclass)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Resolve a failure-mode set to the applicable error codes.
///
/// FM30 dominance: if the terminal escalation mode is in the input set, the
/// result is exactly the codes whose entry covers FM30 and nothing else.
/// Otherwise the result is the union of codes over every entry whose covered
/// modes intersect the input. Output is deduplicated and sorted ascending so
/// repeated runs are byte-identical for drift comparison.
pub fn resolve_error_codes(failure_modes: &[String], registry: &ErrorRegistry) -> Vec<String> {
    let modes: FxHashSet<&str> = failure_modes.iter().map(String::as_str).collect();

    let dominated = modes.contains(TERMINAL_ESCALATION_MODE);
    let mut codes: BTreeSet<String> = BTreeSet::new();

    for entry in &registry.registry {
        let selected = if dominated {
            entry.fm.iter().any(|fm| fm == TERMINAL_ESCALATION_MODE)
        } else {
            entry.fm.iter().any(|fm| modes.contains(fm.as_str()))
        };
        if selected {
            codes.insert(entry.id.clone());
        }
    }

    codes.into_iter().collect()
}
