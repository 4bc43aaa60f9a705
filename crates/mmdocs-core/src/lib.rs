//! # mmdocs-core
//!
//! Core functionality for mmdocs - a Mermaid documentation and diagram
//! validation service for automated agents.
//!
//! This crate provides the in-memory documentation corpus, keyword search
//! with header-delimited excerpts, a parser-free structural validator with
//! an optional full-parser oracle, and the static diagram-type catalog. It
//! is transport-agnostic: the MCP protocol surface lives in `mmdocs-mcp`.
//!
//! ## Architecture
//!
//! - **Corpus**: fixed document set loaded once, read-only thereafter, with
//!   at-most-once lazy initialization for concurrent callers
//! - **Search**: deterministic substring search in two modes (line-indexed
//!   with context windows, section-indexed with excerpts or full documents)
//! - **Validation**: fast heuristic checks, optionally chained to the real
//!   parser as a black-box oracle
//! - **Catalog**: static diagram-type table and example extraction
//!
//! ## Quick start
//!
//! ```rust
//! use mmdocs_core::{Corpus, Document, SearchMode, SectionSearchQuery, section_search};
//!
//! let corpus = Corpus::from_documents(vec![Document {
//!     id: "flowchart.md".to_string(),
//!     text: "# Flowcharts\n\nArrows show direction.".to_string(),
//! }]);
//!
//! let results = section_search(
//!     &corpus,
//!     &SectionSearchQuery {
//!         term: "arrows".to_string(),
//!         category: None,
//!         mode: SearchMode::Snippet,
//!         case_sensitive: false,
//!         max_documents: 5,
//!     },
//! )?;
//!
//! assert_eq!(results.total_documents, 1);
//! # Ok::<(), mmdocs_core::Error>(())
//! ```

/// Structural analysis of diagram code
pub mod analysis;
/// Static diagram-type catalog and example extraction
pub mod catalog;
/// Configuration loading
pub mod config;
/// Context windows around matched lines
pub mod context;
/// In-memory documentation corpus
pub mod corpus;
/// Error types and result aliases
pub mod error;
/// External full-parser oracle
pub mod oracle;
/// Keyword search over the corpus
pub mod search;
/// Header-delimited section extraction
pub mod sections;
/// Heuristic structural validation
pub mod validate;

// Re-export commonly used types
pub use analysis::{DiagramAnalysis, DiagramStatistics, analyze};
pub use catalog::{DIAGRAM_KINDS, DiagramKind, KindExamples, extract_examples, known_names};
pub use config::{Config, ExtraDoc, OracleConfig, PathsConfig, PromptEntry};
pub use context::{MatchWindow, context_window};
pub use corpus::{Corpus, Document, SharedCorpus};
pub use error::{Error, Result};
pub use oracle::{MmdcOracle, NonSignalFailure, OracleVerdict, RenderOracle};
pub use search::{
    LineSearchQuery, LineSearchResults, SearchMode, SectionSearchQuery, SectionSearchResults,
    line_search, section_search,
};
pub use sections::{Section, extract_sections, header_depth};
pub use validate::{ValidationOutcome, validate_structure, validate_with_oracle};
