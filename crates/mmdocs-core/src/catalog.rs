//! Static catalog of diagram types and example extraction.
//!
//! The catalog is a fixed table of every diagram kind the markup language
//! supports, with aliases and a short description. It also provides the
//! reference-document splitter used by example retrieval: the reference is
//! divided on level-2 headers and the first section whose normalized name
//! matches the requested kind wins.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::{Error, Result};

/// Characters of the matched section included as a preview in example
/// payloads.
const SECTION_PREVIEW_CHARS: usize = 500;

/// One diagram kind known to the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct DiagramKind {
    /// Canonical keyword that opens a diagram of this kind.
    pub name: &'static str,
    /// Alternate keywords accepted for the same kind.
    #[serde(rename = "alias", skip_serializing_if = "<[_]>::is_empty")]
    pub aliases: &'static [&'static str],
    /// Human-readable description.
    pub description: &'static str,
}

/// Every diagram kind the service knows about, in documentation order.
pub const DIAGRAM_KINDS: &[DiagramKind] = &[
    DiagramKind {
        name: "flowchart",
        aliases: &["graph"],
        description: "General purpose flow diagrams with nodes and edges",
    },
    DiagramKind {
        name: "sequenceDiagram",
        aliases: &[],
        description: "Message flows and interactions between actors over time",
    },
    DiagramKind {
        name: "classDiagram",
        aliases: &[],
        description: "Object-oriented class structures and relationships",
    },
    DiagramKind {
        name: "stateDiagram-v2",
        aliases: &["stateDiagram"],
        description: "State machines and transitions",
    },
    DiagramKind {
        name: "erDiagram",
        aliases: &[],
        description: "Entity-relationship diagrams for databases",
    },
    DiagramKind {
        name: "gantt",
        aliases: &[],
        description: "Project timelines and schedules",
    },
    DiagramKind {
        name: "pie",
        aliases: &[],
        description: "Pie charts for proportional data",
    },
    DiagramKind {
        name: "quadrantChart",
        aliases: &[],
        description: "2x2 prioritization matrices",
    },
    DiagramKind {
        name: "requirementDiagram",
        aliases: &[],
        description: "Requirements engineering diagrams",
    },
    DiagramKind {
        name: "gitGraph",
        aliases: &[],
        description: "Git commit history visualization",
    },
    DiagramKind {
        name: "C4Context",
        aliases: &["C4Container", "C4Component", "C4Dynamic", "C4Deployment"],
        description: "C4 model architecture diagrams",
    },
    DiagramKind {
        name: "mindmap",
        aliases: &[],
        description: "Hierarchical mind mapping",
    },
    DiagramKind {
        name: "timeline",
        aliases: &[],
        description: "Historical events and milestones",
    },
    DiagramKind {
        name: "zenuml",
        aliases: &[],
        description: "Alternative sequence diagram syntax",
    },
    DiagramKind {
        name: "sankey-beta",
        aliases: &[],
        description: "Flow quantities between nodes",
    },
    DiagramKind {
        name: "xychart-beta",
        aliases: &[],
        description: "XY coordinate charts and graphs",
    },
    DiagramKind {
        name: "block-beta",
        aliases: &[],
        description: "Block-based diagrams",
    },
    DiagramKind {
        name: "packet-beta",
        aliases: &[],
        description: "Network packet structures",
    },
    DiagramKind {
        name: "architecture-beta",
        aliases: &[],
        description: "System architecture diagrams",
    },
    DiagramKind {
        name: "kanban",
        aliases: &[],
        description: "Kanban boards",
    },
    DiagramKind {
        name: "treemap",
        aliases: &[],
        description: "Hierarchical treemap visualizations",
    },
    DiagramKind {
        name: "radar",
        aliases: &[],
        description: "Multi-dimensional radar charts",
    },
];

static LEVEL2_HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a compile-time constant
    Regex::new(r"(?m)^## ").unwrap()
});

static MERMAID_FENCE_RE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a compile-time constant
    Regex::new(r"(?s)```mermaid\n(.*?)```").unwrap()
});

/// Every recognized diagram keyword (canonical names with their aliases),
/// in catalog order.
pub fn recognized_keywords() -> impl Iterator<Item = &'static str> {
    DIAGRAM_KINDS
        .iter()
        .flat_map(|kind| std::iter::once(kind.name).chain(kind.aliases.iter().copied()))
}

/// Canonical names of all known diagram kinds.
#[must_use]
pub fn known_names() -> Vec<&'static str> {
    DIAGRAM_KINDS.iter().map(|kind| kind.name).collect()
}

/// Identify the diagram kind declared on a diagram's first line, if any.
#[must_use]
pub fn find_kind(first_line: &str) -> Option<&'static DiagramKind> {
    DIAGRAM_KINDS.iter().find(|kind| {
        first_line.contains(kind.name)
            || kind.aliases.iter().any(|alias| first_line.contains(alias))
    })
}

/// Normalize a kind name for section matching: lowercase with hyphens and
/// spaces removed, so `stateDiagram-v2`, `statediagramv2`, and
/// `state diagram-v2` all compare equal.
fn normalize(name: &str) -> String {
    name.to_lowercase().replace(['-', ' '], "")
}

/// Extracted examples for one diagram kind.
#[derive(Debug, Clone, Serialize)]
pub struct KindExamples {
    /// The requested kind, as given by the caller.
    pub kind: String,
    /// Fenced code examples in document order, fences stripped.
    pub examples: Vec<String>,
    /// Leading preview of the matched reference section.
    pub section_preview: String,
}

/// Extract the fenced code examples for `requested` from a reference
/// document.
///
/// The reference is split on level-2 headers; the first section whose
/// normalized leading text matches the normalized request wins. Every
/// ` ```mermaid ` fence inside that section is returned with its delimiters
/// stripped.
///
/// # Errors
///
/// Returns [`Error::NotFound`] when no section matches; the caller is
/// expected to surface the known kind names alongside.
pub fn extract_examples(reference: &str, requested: &str) -> Result<KindExamples> {
    let normalized = normalize(requested);
    if normalized.is_empty() {
        return Err(Error::InvalidInput("diagram type cannot be empty".into()));
    }

    let section = LEVEL2_HEADER_RE
        .split(reference)
        .find(|section| normalize(section).starts_with(&normalized))
        .ok_or_else(|| {
            Error::NotFound(format!("No examples found for diagram type: {requested}"))
        })?;

    let examples: Vec<String> = MERMAID_FENCE_RE
        .captures_iter(section)
        .map(|caps| caps[1].trim().to_string())
        .collect();

    let mut section_preview: String = section.chars().take(SECTION_PREVIEW_CHARS).collect();
    if section.chars().count() > SECTION_PREVIEW_CHARS {
        section_preview.push_str("...");
    }

    Ok(KindExamples {
        kind: requested.to_string(),
        examples,
        section_preview,
    })
}
