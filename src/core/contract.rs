//! Contract unit validation pipeline.
//!
//! Stages run in a fixed order with a fail-fast boundary after schema
//! conformance: SchemaCheck, FailureGraphCheck, MetadataCheck, WarningScan.
//! Semantic checks presuppose the shape the schema guarantees, so a
//! structurally broken document never reaches them. Warnings are governance
//! smells and never affect validity.

use crate::core::graph::{validate_failure_graph, FailureGraph};
use crate::core::schema::SchemaChecker;
use crate::core::temporal::parse_instant;
use crate::core::version::compare_versions;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Compatibility {
    #[serde(default)]
    pub environments: Vec<String>,
    #[serde(default)]
    pub minimum_version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractMetadata {
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub compatibility: Compatibility,
}

/// A service-level governance policy document. Read-only input to validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contract {
    #[serde(default)]
    pub contract_version: String,
    #[serde(default)]
    pub service_name: String,
    #[serde(default)]
    pub artifact_schema: Value,
    #[serde(default)]
    pub failure_graph: FailureGraph,
    #[serde(default)]
    pub metadata: ContractMetadata,
}

/// Outcome of a full contract validation run.
#[derive(Debug, Clone, Serialize)]
pub struct ContractVerdict {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Validate a complete contract unit against its schema and semantic rules.
pub fn validate_contract(document: &Value, schema: &SchemaChecker) -> ContractVerdict {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // Stage 1: schema conformance. A structural failure halts the pipeline.
    let schema_errors = schema.check(document);
    if !schema_errors.is_empty() {
        return ContractVerdict {
            is_valid: false,
            errors: schema_errors,
            warnings,
        };
    }

    // The schema guarantees the shape, so the typed decode only fails on
    // shapes the schema does not constrain; those surface as structural
    // errors rather than panics.
    let contract: Contract = match serde_json::from_value(document.clone()) {
        Ok(contract) => contract,
        Err(err) => {
            return ContractVerdict {
                is_valid: false,
                errors: vec![format!("Schema error at 'root': {}", err)],
                warnings,
            };
        }
    };

    // Stage 2: failure graph invariants.
    errors.extend(validate_failure_graph(&contract.failure_graph));

    // Stage 3: metadata consistency.
    errors.extend(validate_metadata_consistency(
        &contract.metadata,
        &contract.contract_version,
    ));

    // Stage 4: governance smells, never blocking.
    warnings.extend(scan_warnings(&contract));

    ContractVerdict {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}

/// Cross-field metadata rules: timestamp ordering, environment coverage,
/// minimum-version compatibility.
pub fn validate_metadata_consistency(
    metadata: &ContractMetadata,
    contract_version: &str,
) -> Vec<String> {
    let mut errors = Vec::new();

    let created = instant_or_report(metadata.created.as_deref(), "created", &mut errors);
    let updated = instant_or_report(metadata.updated.as_deref(), "updated", &mut errors);

    if let (Some(created), Some(updated)) = (created, updated) {
        if created > updated {
            errors.push(format!(
                "Metadata: 'created' date ({}) is after 'updated' date ({})",
                metadata.created.as_deref().unwrap_or(""),
                metadata.updated.as_deref().unwrap_or("")
            ));
        }
    }

    if metadata.compatibility.environments.is_empty() {
        errors.push("Metadata: compatibility.environments must not be empty".to_string());
    }

    if let Some(minimum_version) = &metadata.compatibility.minimum_version {
        match compare_versions(contract_version, minimum_version) {
            Ok(Ordering::Less) => errors.push(format!(
                "Metadata: contract_version ({}) is less than minimum_version ({})",
                contract_version, minimum_version
            )),
            Ok(_) => {}
            Err(parse_error) => errors.push(format!(
                "Metadata: cannot compare versions: {}",
                parse_error
            )),
        }
    }

    errors
}

fn instant_or_report(
    raw: Option<&str>,
    field: &str,
    errors: &mut Vec<String>,
) -> Option<chrono::DateTime<chrono::Utc>> {
    let raw = raw?;
    if raw.trim().is_empty() {
        return None;
    }
    let parsed = parse_instant(raw);
    if parsed.is_none() {
        errors.push(format!(
            "Metadata: '{}' has unrecognized timestamp format ({})",
            field, raw
        ));
    }
    parsed
}

fn scan_warnings(contract: &Contract) -> Vec<String> {
    let mut warnings = Vec::new();

    if contract
        .metadata
        .description
        .as_deref()
        .unwrap_or("")
        .is_empty()
    {
        warnings.push("Metadata: 'description' field is recommended but missing".to_string());
    }

    let tags_empty = contract
        .metadata
        .tags
        .as_ref()
        .map(|tags| tags.is_empty())
        .unwrap_or(true);
    if tags_empty {
        warnings.push("Metadata: 'tags' field is recommended but missing or empty".to_string());
    }

    if contract.metadata.compatibility.environments.len() == 1 {
        warnings.push(
            "Metadata: only one compatibility environment declared (consider multi-environment support)"
                .to_string(),
        );
    }

    if has_unconstrained_models(&contract.artifact_schema) {
        warnings.push(
            "Artifact schema declares a 'models' array without an 'items' constraint".to_string(),
        );
    }

    warnings
}

// Governance smell: an artifact schema with a `models` array whose `items`
// constraint is absent or an empty object places no bound on what models an
// artifact may reference.
fn has_unconstrained_models(artifact_schema: &Value) -> bool {
    let Some(models) = artifact_schema
        .get("properties")
        .and_then(|p| p.get("models"))
    else {
        return false;
    };
    if models.get("type").and_then(Value::as_str) != Some("array") {
        return false;
    }
    match models.get("items") {
        None => true,
        Some(items) => items.as_object().is_some_and(|o| o.is_empty()),
    }
}
