//! Validation and analysis tool implementations

use mmdocs_core::{
    DiagramAnalysis, RenderOracle, ValidationOutcome, analyze, validate_structure,
    validate_with_oracle,
};
use schemars::JsonSchema;
use serde::Deserialize;

/// Parameters for the `validate_mermaid` tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ValidateParams {
    /// The Mermaid diagram code to validate
    pub code: String,
}

/// Handle a validation request, consulting the oracle when configured.
///
/// Validation outcomes are first-class results: this function never fails.
pub async fn handle_validate(
    params: ValidateParams,
    oracle: Option<&dyn RenderOracle>,
) -> ValidationOutcome {
    validate_with_oracle(&params.code, oracle).await
}

/// Parameters for the `analyze_diagram` tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AnalyzeParams {
    /// The Mermaid diagram code to analyze
    pub code: String,
}

/// Handle an analysis request.
///
/// Analysis uses the structural checks only; the oracle is reserved for
/// explicit validation calls.
#[must_use]
pub fn handle_analyze(params: &AnalyzeParams) -> DiagramAnalysis {
    let validation = validate_structure(&params.code);
    analyze(&params.code, &validation)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_validate_without_oracle() {
        let params = ValidateParams {
            code: "flowchart LR\n    A[Start] --> B[End]".to_string(),
        };
        let outcome = handle_validate(params, None).await;

        assert!(outcome.valid);
        assert!(outcome.error.is_none());
    }

    #[tokio::test]
    async fn test_validate_reports_structural_failure() {
        let params = ValidateParams {
            code: "flowchart LR\n    A[Start --> B[End]".to_string(),
        };
        let outcome = handle_validate(params, None).await;

        assert!(!outcome.valid);
        assert!(outcome.error.unwrap().contains("Unmatched brackets"));
    }

    #[test]
    fn test_analyze_includes_validation_and_statistics() {
        let params = AnalyzeParams {
            code: "flowchart LR\n    A[Start] --> B[End]".to_string(),
        };
        let analysis = handle_analyze(&params);

        assert!(analysis.valid);
        assert_eq!(analysis.diagram_type, "flowchart");
        assert_eq!(analysis.statistics.estimated_node_count, 2);
        assert_eq!(analysis.statistics.estimated_connection_count, 1);
    }

    #[test]
    fn test_analyze_invalid_code_still_returns_analysis() {
        let params = AnalyzeParams {
            code: "not a diagram at all".to_string(),
        };
        let analysis = handle_analyze(&params);

        assert!(!analysis.valid);
        assert_eq!(analysis.diagram_type, "unknown");
        assert_eq!(analysis.errors.len(), 1);
    }
}
