//! Structural analysis of diagram code.
//!
//! Produces rough statistics (node and connection estimates are regex-based
//! and intentionally approximate), the detected diagram kind, and a fixed
//! set of improvement suggestions driven by size thresholds.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::catalog::find_kind;
use crate::validate::ValidationOutcome;

/// Line count above which splitting the diagram is suggested.
const LARGE_DIAGRAM_LINES: usize = 50;
/// Node count above which grouping into subgraphs is suggested.
const LARGE_NODE_COUNT: usize = 20;
/// Line count above which comments are suggested.
const COMMENT_SUGGESTION_LINES: usize = 20;
/// Node count above which styling is suggested.
const STYLE_SUGGESTION_NODES: usize = 10;

static NODE_RE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a compile-time constant
    Regex::new(r"[\[(]\w+").unwrap()
});

static ARROW_RE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a compile-time constant
    Regex::new(r"--+>|==+>|\.\.+>").unwrap()
});

/// Rough structural statistics for a diagram.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramStatistics {
    /// Number of lines in the trimmed source.
    pub line_count: usize,
    /// Estimated node count (shape-opening tokens).
    pub estimated_node_count: usize,
    /// Estimated connection count (arrow tokens).
    pub estimated_connection_count: usize,
    /// Whether any subgraph blocks are present.
    pub has_subgraphs: bool,
    /// Whether style or class definitions are present.
    pub has_styles: bool,
    /// Whether `%%` comments are present.
    pub has_comments: bool,
}

/// Full analysis of one diagram.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramAnalysis {
    /// Validation verdict the analysis was built from.
    pub valid: bool,
    /// Validation errors (empty when valid).
    pub errors: Vec<String>,
    /// Validation warnings.
    pub warnings: Vec<String>,
    /// Detected diagram kind, or `"unknown"`.
    pub diagram_type: String,
    /// Structural statistics.
    pub statistics: DiagramStatistics,
    /// Improvement suggestions.
    pub suggestions: Vec<String>,
}

/// Analyze diagram code given an already-computed validation outcome.
#[must_use]
pub fn analyze(code: &str, validation: &ValidationOutcome) -> DiagramAnalysis {
    let trimmed = code.trim();

    let first_line = trimmed.lines().next().unwrap_or_default();
    let diagram_type = find_kind(first_line).map_or("unknown", |kind| kind.name);

    let line_count = trimmed.lines().count();
    let node_count = NODE_RE.find_iter(trimmed).count();
    let arrow_count = ARROW_RE.find_iter(trimmed).count();
    let has_subgraphs = trimmed.contains("subgraph");
    let has_styles = trimmed.contains("style ") || trimmed.contains("classDef");
    let has_comments = trimmed.contains("%%");

    let mut suggestions = Vec::new();
    if line_count > LARGE_DIAGRAM_LINES {
        suggestions.push(
            "Consider breaking this into multiple diagrams or using subgraphs for better organization"
                .to_string(),
        );
    }
    if node_count > LARGE_NODE_COUNT {
        suggestions.push(
            "Large number of nodes detected - consider grouping related nodes in subgraphs"
                .to_string(),
        );
    }
    if !has_comments && line_count > COMMENT_SUGGESTION_LINES {
        suggestions
            .push("Add comments (using %%) to document complex parts of the diagram".to_string());
    }
    if !has_styles && node_count > STYLE_SUGGESTION_NODES {
        suggestions
            .push("Consider adding styles or classes to highlight important nodes".to_string());
    }

    DiagramAnalysis {
        valid: validation.valid,
        errors: validation.error.iter().cloned().collect(),
        warnings: validation.warnings.clone(),
        diagram_type: diagram_type.to_string(),
        statistics: DiagramStatistics {
            line_count,
            estimated_node_count: node_count,
            estimated_connection_count: arrow_count,
            has_subgraphs,
            has_styles,
            has_comments,
        },
        suggestions,
    }
}
