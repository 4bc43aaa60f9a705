//! Keyword search over the documentation corpus.
//!
//! Two modes are supported. Line-indexed search scans every document line by
//! line and pairs each hit with a context window. Section-indexed search
//! returns header-delimited excerpts (or whole documents) for every document
//! whose text contains the term, optionally filtered by diagram category.
//!
//! There is no relevance scoring: results follow corpus load order and are
//! byte-identical across repeated calls for the same corpus and query.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::{MatchWindow, context_window};
use crate::corpus::Corpus;
use crate::sections::extract_sections;
use crate::{Error, Result};

/// Upper bound for per-document hits in line-indexed search.
pub const LINE_SEARCH_MAX_HITS: usize = 200;
/// Upper bound for collected documents in section-indexed search.
pub const SECTION_SEARCH_MAX_DOCS: usize = 20;
/// Maximum sections joined into one excerpt per document.
pub const MAX_SECTIONS_PER_DOCUMENT: usize = 3;
/// Separator rendered between joined sections.
pub const SECTION_SEPARATOR: &str = "\n\n---\n\n";

/// Whether section-indexed search returns excerpts or whole documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Return only the matching header-delimited sections.
    Snippet,
    /// Return the full document text.
    Full,
}

impl Default for SearchMode {
    fn default() -> Self {
        Self::Snippet
    }
}

/// Parameters for line-indexed search.
#[derive(Debug, Clone)]
pub struct LineSearchQuery {
    /// Term to search for (non-empty).
    pub term: String,
    /// Whether comparison is case-sensitive.
    pub case_sensitive: bool,
    /// Per-document hit budget; clamped to `1..=200`.
    pub max_hits: usize,
    /// Lines of context on each side of a match.
    pub context_radius: usize,
}

/// Line-indexed matches for one document.
#[derive(Debug)]
pub struct DocumentLineMatches {
    /// Document id.
    pub id: String,
    /// Matches in line order.
    pub matches: Vec<MatchWindow>,
}

/// Aggregate result of a line-indexed search.
#[derive(Debug)]
pub struct LineSearchResults {
    /// Documents with at least one match, in corpus order.
    pub documents: Vec<DocumentLineMatches>,
    /// Count of documents with at least one match.
    pub total_documents: usize,
    /// Sum of per-document match counts.
    pub total_matches: usize,
}

/// Parameters for section-indexed search.
#[derive(Debug, Clone)]
pub struct SectionSearchQuery {
    /// Term to search for (non-empty).
    pub term: String,
    /// Optional category filter, matched as a substring of the normalized
    /// document id.
    pub category: Option<String>,
    /// Excerpt or whole-document payloads.
    pub mode: SearchMode,
    /// Whether comparison is case-sensitive.
    pub case_sensitive: bool,
    /// Maximum documents to collect; clamped to `1..=20`.
    pub max_documents: usize,
}

/// Section-indexed result for one document.
#[derive(Debug)]
pub struct DocumentExcerpt {
    /// Document id.
    pub id: String,
    /// Number of term occurrences in the document.
    pub match_count: usize,
    /// Joined sections (snippet mode) or full text (full mode).
    pub excerpt: String,
}

/// Aggregate result of a section-indexed search.
#[derive(Debug)]
pub struct SectionSearchResults {
    /// Mode the search ran in.
    pub mode: SearchMode,
    /// Collected documents, in corpus order.
    pub documents: Vec<DocumentExcerpt>,
    /// Count of collected documents.
    pub total_documents: usize,
    /// Sum of per-document occurrence counts.
    pub total_matches: usize,
}

fn validate_term(term: &str) -> Result<()> {
    if term.trim().is_empty() {
        return Err(Error::InvalidInput("search term cannot be empty".into()));
    }
    Ok(())
}

fn ensure_searchable(corpus: &Corpus) -> Result<()> {
    if corpus.is_empty() {
        return Err(Error::CorpusUnavailable(
            "no documentation files are loaded".into(),
        ));
    }
    Ok(())
}

fn fold(text: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        text.to_string()
    } else {
        text.to_lowercase()
    }
}

/// Normalize a document id for category filtering: lowercase with the `.md`
/// extension stripped.
fn normalize_id(id: &str) -> String {
    id.to_lowercase()
        .trim_end_matches(".md")
        .to_string()
}

/// Run a line-indexed search across the whole corpus.
///
/// Documents with zero matches are omitted. Per-document hits are capped at
/// the clamped `max_hits` budget; matches are collected in line order.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for an empty term and
/// [`Error::CorpusUnavailable`] when there is nothing to search.
pub fn line_search(corpus: &Corpus, query: &LineSearchQuery) -> Result<LineSearchResults> {
    validate_term(&query.term)?;
    ensure_searchable(corpus)?;

    let needle = fold(&query.term, query.case_sensitive);
    let max_hits = query.max_hits.clamp(1, LINE_SEARCH_MAX_HITS);

    let mut documents = Vec::new();
    let mut total_matches = 0;

    for doc in corpus {
        let lines: Vec<&str> = doc.text.lines().collect();
        let mut matches = Vec::new();

        for (i, line) in lines.iter().enumerate() {
            if matches.len() >= max_hits {
                break;
            }
            if line.is_empty() {
                continue;
            }
            if fold(line, query.case_sensitive).contains(&needle) {
                matches.push(context_window(&lines, i, query.context_radius));
            }
        }

        if !matches.is_empty() {
            total_matches += matches.len();
            documents.push(DocumentLineMatches {
                id: doc.id.clone(),
                matches,
            });
        }
    }

    debug!(
        term = %query.term,
        documents = documents.len(),
        matches = total_matches,
        "line search completed"
    );

    Ok(LineSearchResults {
        total_documents: documents.len(),
        total_matches,
        documents,
    })
}

/// Run a section-indexed search across the corpus.
///
/// Enumeration follows corpus load order and stops once the clamped
/// `max_documents` budget is filled. Snippet mode joins at most
/// [`MAX_SECTIONS_PER_DOCUMENT`] sections per document with a visible
/// separator; full mode returns the entire document text.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for an empty term and
/// [`Error::CorpusUnavailable`] when there is nothing to search.
pub fn section_search(corpus: &Corpus, query: &SectionSearchQuery) -> Result<SectionSearchResults> {
    validate_term(&query.term)?;
    ensure_searchable(corpus)?;

    let needle = fold(&query.term, query.case_sensitive);
    let max_documents = query.max_documents.clamp(1, SECTION_SEARCH_MAX_DOCS);
    let category = query
        .category
        .as_deref()
        .map(str::to_lowercase)
        .filter(|c| !c.trim().is_empty());

    let mut documents = Vec::new();
    let mut total_matches = 0;

    for doc in corpus {
        if documents.len() >= max_documents {
            break;
        }

        if let Some(ref category) = category {
            if !normalize_id(&doc.id).contains(category) {
                continue;
            }
        }

        let haystack = fold(&doc.text, query.case_sensitive);
        let match_count = haystack.matches(&needle).count();
        if match_count == 0 {
            continue;
        }

        let excerpt = match query.mode {
            SearchMode::Full => doc.text.clone(),
            SearchMode::Snippet => {
                let sections = extract_sections(&doc.text, &query.term, query.case_sensitive);
                if sections.is_empty() {
                    // Occurrences that span line boundaries have no line-scoped
                    // section; such a document is skipped rather than emitted
                    // with an empty excerpt.
                    continue;
                }
                sections
                    .iter()
                    .take(MAX_SECTIONS_PER_DOCUMENT)
                    .map(|s| s.text.as_str())
                    .collect::<Vec<_>>()
                    .join(SECTION_SEPARATOR)
            },
        };

        total_matches += match_count;
        documents.push(DocumentExcerpt {
            id: doc.id.clone(),
            match_count,
            excerpt,
        });
    }

    debug!(
        term = %query.term,
        mode = ?query.mode,
        documents = documents.len(),
        matches = total_matches,
        "section search completed"
    );

    Ok(SectionSearchResults {
        mode: query.mode,
        total_documents: documents.len(),
        total_matches,
        documents,
    })
}
