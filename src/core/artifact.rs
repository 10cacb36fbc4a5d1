//! Artifact validation: schema conformance plus failure-mode classification.

use crate::core::observability::{EventSink, ValidatorEvent};
use crate::core::resolver::{
    resolve_error_codes, resolve_failure_modes, ErrorRegistry, MappingRegistry,
    SCHEMA_FAILURE_MODE, SCHEMA_SENTINEL_CODE,
};
use crate::core::schema::SchemaChecker;
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_artifact_id() -> String {
    "unknown".to_string()
}

/// A runtime-emitted object under governance.
///
/// `id` defaults to the literal `unknown` at the deserialization boundary so
/// validators never re-derive the sentinel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(default = "default_artifact_id")]
    pub id: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub instance: String,
    #[serde(default)]
    pub models: Vec<String>,
}

impl Default for Artifact {
    fn default() -> Self {
        Artifact {
            id: default_artifact_id(),
            domain: String::new(),
            class: String::new(),
            instance: String::new(),
            models: Vec::new(),
        }
    }
}

impl Artifact {
    /// Decode a raw document into the typed shape.
    ///
    /// All fields are defaulted, so any JSON object decodes; a non-object
    /// falls back to the all-default artifact (schema validation will have
    /// rejected it anyway).
    pub fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }
}

/// Validate an artifact and resolve its error-code set.
///
/// Schema non-conformance collapses to the single sentinel code; violations
/// are not itemized at this layer. Otherwise the artifact's class is looked
/// up in the mapping registry (absent key means no failure modes) and the
/// resulting modes are resolved under FM30 dominance. The returned list is
/// sorted and deduplicated.
///
/// The observability event is emitted only after the result is constructed;
/// sink faults are discarded and cannot change the outcome.
pub fn validate_artifact(
    artifact: &Value,
    schema: &SchemaChecker,
    mappings: &MappingRegistry,
    registry: &ErrorRegistry,
    sink: Option<&mut dyn EventSink>,
    correlation_id: Option<String>,
) -> Vec<String> {
    let typed = Artifact::from_value(artifact);

    let (error_codes, failure_modes) = if !schema.conforms(artifact) {
        (
            vec![SCHEMA_SENTINEL_CODE.to_string()],
            vec![SCHEMA_FAILURE_MODE.to_string()],
        )
    } else {
        let modes = resolve_failure_modes(&typed.class, mappings).to_vec();
        let codes = resolve_error_codes(&modes, registry);
        (codes, modes)
    };

    if let Some(sink) = sink {
        let event = ValidatorEvent::new(
            &typed.id,
            crate::core::assets::SCHEMA_VERSION,
            &error_codes,
            &failure_modes,
            correlation_id,
        );
        // Observability is best-effort; a failing sink never surfaces.
        let _ = sink.emit(&event);
    }

    error_codes
}
