//! Diagram type listing and example retrieval tools

use std::path::Path;

use mmdocs_core::{DIAGRAM_KINDS, DiagramKind, extract_examples, known_names};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{McpError, McpResult};

/// Output from the `list_diagram_types` tool
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDiagramTypesOutput {
    /// The static diagram-type table
    pub diagram_types: &'static [DiagramKind],
    /// Number of entries
    pub total_count: usize,
}

/// Handle a diagram-type listing request
#[must_use]
pub fn handle_list_diagram_types() -> ListDiagramTypesOutput {
    ListDiagramTypesOutput {
        diagram_types: DIAGRAM_KINDS,
        total_count: DIAGRAM_KINDS.len(),
    }
}

/// Parameters for the `get_examples` tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetExamplesParams {
    /// The diagram type (e.g. 'flowchart', 'sequenceDiagram', 'classDiagram')
    pub diagram_type: String,
}

/// Successful example payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetExamplesOutput {
    /// The requested diagram type
    pub diagram_type: String,
    /// Number of extracted examples
    pub examples_count: usize,
    /// Code examples with fences stripped, in document order
    pub examples: Vec<String>,
    /// Leading preview of the matched reference section
    pub section: String,
}

/// Not-found payload listing the known diagram types
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamplesNotFound {
    /// Why the request could not be served
    pub error: String,
    /// Canonical names of every known diagram type
    pub available_types: Vec<&'static str>,
}

/// Reply from the `get_examples` tool: found payloads succeed, not-found
/// payloads are surfaced as structured tool errors rather than protocol
/// faults.
#[derive(Debug)]
pub enum ExamplesReply {
    /// The reference section was found
    Found(GetExamplesOutput),
    /// No section matched (or the reference file is missing)
    NotFound(ExamplesNotFound),
}

/// Handle an example retrieval request against the on-disk reference file.
pub fn handle_get_examples(
    reference_path: &Path,
    params: GetExamplesParams,
) -> McpResult<ExamplesReply> {
    let reference = match std::fs::read_to_string(reference_path) {
        Ok(reference) => reference,
        Err(e) => {
            warn!(path = %reference_path.display(), error = %e, "reference file unavailable");
            return Ok(ExamplesReply::NotFound(ExamplesNotFound {
                error: "Reference file not found".to_string(),
                available_types: known_names(),
            }));
        },
    };

    match extract_examples(&reference, &params.diagram_type) {
        Ok(found) => Ok(ExamplesReply::Found(GetExamplesOutput {
            diagram_type: found.kind,
            examples_count: found.examples.len(),
            examples: found.examples,
            section: found.section_preview,
        })),
        Err(mmdocs_core::Error::NotFound(error)) => Ok(ExamplesReply::NotFound(ExamplesNotFound {
            error,
            available_types: known_names(),
        })),
        Err(e) => Err(McpError::Core(e)),
    }
}
