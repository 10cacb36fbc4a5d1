//! Machine-readable contract validation reports.

use crate::core::contract::ContractVerdict;
use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportCompatibility {
    pub validated_environments: Vec<String>,
}

/// Serialized result of one `validate-contract` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub service_name: String,
    pub validation_status: String,
    pub timestamp: String,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub compatibility: ReportCompatibility,
}

pub fn generate_report(
    service_name: &str,
    verdict: &ContractVerdict,
    validated_environments: &[String],
) -> ValidationReport {
    ValidationReport {
        service_name: service_name.to_string(),
        validation_status: if verdict.is_valid { "pass" } else { "fail" }.to_string(),
        timestamp: Utc::now().to_rfc3339(),
        errors: verdict.errors.clone(),
        warnings: verdict.warnings.clone(),
        compatibility: ReportCompatibility {
            validated_environments: validated_environments.to_vec(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_carries_verdict_and_environments() {
        let verdict = ContractVerdict {
            is_valid: false,
            errors: vec!["Metadata: compatibility.environments must not be empty".to_string()],
            warnings: vec!["Metadata: 'description' field is recommended but missing".to_string()],
        };
        let report = generate_report("billing", &verdict, &["production".to_string()]);
        assert_eq!(report.service_name, "billing");
        assert_eq!(report.validation_status, "fail");
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.compatibility.validated_environments, vec!["production"]);
    }

    #[test]
    fn passing_verdict_serializes_as_pass() {
        let verdict = ContractVerdict {
            is_valid: true,
            errors: vec![],
            warnings: vec![],
        };
        let report = generate_report("billing", &verdict, &[]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["validation_status"], "pass");
        assert!(json["timestamp"].is_string());
    }
}
