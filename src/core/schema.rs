//! JSON-Schema conformance collaborator.
//!
//! Structural validation is delegated to the `jsonschema` crate; the semantic
//! validators only consume the pass/fail result and the path-annotated error
//! list produced here. Error paths are rendered as dot paths with `root` for
//! the document itself, e.g. `Schema error at 'metadata.compatibility': ...`.

use crate::core::error::GavelError;
use serde_json::Value;

/// Compiled schema wrapper shared by contract and artifact validation.
pub struct SchemaChecker {
    validator: jsonschema::Validator,
}

impl SchemaChecker {
    /// Compile a JSON Schema document (draft 2020-12).
    pub fn new(schema: &Value) -> Result<Self, GavelError> {
        let validator = jsonschema::options()
            .build(schema)
            .map_err(|e| GavelError::InvalidSchema(e.to_string()))?;
        Ok(Self { validator })
    }

    /// Collect every structural violation as a path-annotated message.
    ///
    /// An empty list means the document conforms.
    pub fn check(&self, document: &Value) -> Vec<String> {
        self.validator
            .iter_errors(document)
            .map(|error| {
                format!(
                    "Schema error at '{}': {}",
                    dot_path(&error.instance_path.to_string()),
                    error
                )
            })
            .collect()
    }

    /// Boolean-equivalent pass/fail, without message formatting.
    pub fn conforms(&self, document: &Value) -> bool {
        self.validator.is_valid(document)
    }
}

fn dot_path(pointer: &str) -> String {
    let trimmed = pointer.trim_start_matches('/');
    if trimmed.is_empty() {
        "root".to_string()
    } else {
        trimmed.replace('/', ".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn checker() -> SchemaChecker {
        let schema = json!({
            "type": "object",
            "required": ["name"],
            "properties": {
                "name": { "type": "string" },
                "nested": {
                    "type": "object",
                    "properties": { "count": { "type": "integer" } }
                }
            }
        });
        SchemaChecker::new(&schema).unwrap()
    }

    #[test]
    fn conforming_document_has_no_errors() {
        let doc = json!({"name": "svc", "nested": {"count": 1}});
        assert!(checker().check(&doc).is_empty());
        assert!(checker().conforms(&doc));
    }

    #[test]
    fn missing_required_field_reports_root_path() {
        let errors = checker().check(&json!({}));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Schema error at 'root':"), "{}", errors[0]);
    }

    #[test]
    fn nested_violation_reports_dot_path() {
        let errors = checker().check(&json!({"name": "svc", "nested": {"count": "two"}}));
        assert!(
            errors.iter().any(|e| e.contains("'nested.count'")),
            "{:?}",
            errors
        );
    }

    #[test]
    fn invalid_schema_document_is_an_error() {
        assert!(SchemaChecker::new(&json!({"type": 12})).is_err());
    }
}
