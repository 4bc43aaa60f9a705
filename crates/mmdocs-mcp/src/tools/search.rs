//! Search tool implementations for line-context and section/full modes

use mmdocs_core::{
    Corpus, LineSearchQuery, SearchMode, SectionSearchQuery, line_search, section_search,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::McpResult;

/// Default per-file hit budget for line-context search
const DEFAULT_LINE_RESULTS: usize = 50;
/// Default context lines on each side of a match
const DEFAULT_CONTEXT_LINES: usize = 3;
/// Default document budget for section/full search
const DEFAULT_SECTION_RESULTS: usize = 5;

/// Parameters for the `search_resource` tool (line-context mode)
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResourceParams {
    /// Text to search for (e.g. 'flowchart arrows', 'sequence notes')
    pub query: String,

    /// Whether the search is case-sensitive (default false)
    #[serde(default)]
    pub case_sensitive: bool,

    /// Maximum matches to return per file (default 50, capped at 200)
    #[serde(default)]
    pub max_results: Option<usize>,

    /// Number of lines to show before and after each match (default 3)
    #[serde(default)]
    pub context_lines: Option<usize>,
}

/// One matched line with rendered context
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineMatch {
    /// Line number (1-based)
    pub line: usize,
    /// Matched line text
    pub text: String,
    /// Rendered context lines, matched line marked with `>>> `
    pub context: Vec<String>,
}

/// Line-context matches for one file
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMatches {
    /// Document id
    pub file: String,
    /// Number of matches in this file
    pub match_count: usize,
    /// Matches in line order
    pub matches: Vec<LineMatch>,
}

/// Output from the `search_resource` tool
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResourceOutput {
    /// The query that was executed
    pub query: String,
    /// Number of files with at least one match
    pub total_files: usize,
    /// Sum of per-file match counts
    pub total_matches: usize,
    /// Per-file results in corpus order
    pub results: Vec<FileMatches>,
}

/// Handle a line-context search request
pub fn handle_search_resource(
    corpus: &Corpus,
    params: SearchResourceParams,
) -> McpResult<SearchResourceOutput> {
    let query = LineSearchQuery {
        term: params.query.clone(),
        case_sensitive: params.case_sensitive,
        max_hits: params.max_results.unwrap_or(DEFAULT_LINE_RESULTS),
        context_radius: params.context_lines.unwrap_or(DEFAULT_CONTEXT_LINES),
    };

    let results = line_search(corpus, &query)?;

    Ok(SearchResourceOutput {
        query: params.query,
        total_files: results.total_documents,
        total_matches: results.total_matches,
        results: results
            .documents
            .into_iter()
            .map(|doc| FileMatches {
                file: doc.id,
                match_count: doc.matches.len(),
                matches: doc
                    .matches
                    .into_iter()
                    .map(|window| LineMatch {
                        line: window.line,
                        text: window.text.clone(),
                        context: window.render(),
                    })
                    .collect(),
            })
            .collect(),
    })
}

/// Result mode accepted on the wire
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ModeParam {
    /// Return only the matching header-delimited sections
    #[default]
    Snippet,
    /// Return the full document text
    Full,
}

impl From<ModeParam> for SearchMode {
    fn from(mode: ModeParam) -> Self {
        match mode {
            ModeParam::Snippet => Self::Snippet,
            ModeParam::Full => Self::Full,
        }
    }
}

/// Parameters for the `search_docs` tool (section/full mode)
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchDocsParams {
    /// Text to search for
    pub query: String,

    /// Restrict the search to documents for one diagram type
    #[serde(default)]
    pub diagram_type: Option<String>,

    /// Result mode: 'snippet' (default) or 'full'
    #[serde(default)]
    pub mode: Option<ModeParam>,

    /// Whether the search is case-sensitive (default false)
    #[serde(default)]
    pub case_sensitive: bool,

    /// Maximum documents to return (default 5, capped at 20)
    #[serde(default)]
    pub max_results: Option<usize>,
}

/// Section or full-document content for one file
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileExcerpt {
    /// Document id
    pub file: String,
    /// Number of term occurrences in the document
    pub match_count: usize,
    /// Joined sections or full text
    pub content: String,
}

/// Output from the `search_docs` tool
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDocsOutput {
    /// The query that was executed
    pub query: String,
    /// Mode the search ran in
    pub mode: ModeParam,
    /// Number of documents returned
    pub total_files: usize,
    /// Sum of per-document occurrence counts
    pub total_matches: usize,
    /// Per-document results in corpus order
    pub results: Vec<FileExcerpt>,
}

/// Handle a section/full search request
pub fn handle_search_docs(
    corpus: &Corpus,
    params: SearchDocsParams,
) -> McpResult<SearchDocsOutput> {
    let mode = params.mode.unwrap_or_default();
    let query = SectionSearchQuery {
        term: params.query.clone(),
        category: params.diagram_type.clone(),
        mode: mode.into(),
        case_sensitive: params.case_sensitive,
        max_documents: params.max_results.unwrap_or(DEFAULT_SECTION_RESULTS),
    };

    let results = section_search(corpus, &query)?;

    Ok(SearchDocsOutput {
        query: params.query,
        mode,
        total_files: results.total_documents,
        total_matches: results.total_matches,
        results: results
            .documents
            .into_iter()
            .map(|doc| FileExcerpt {
                file: doc.id,
                match_count: doc.match_count,
                content: doc.excerpt,
            })
            .collect(),
    })
}
