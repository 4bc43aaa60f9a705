//! Resource bindings for corpus documents and configured extras.
//!
//! Bindings are produced by a pure function from the corpus and the
//! configuration; there is no registration side table. Corpus documents are
//! exposed under `mmdocs://syntax/{name}` and configured extras under
//! whatever URI they declare.

use mmdocs_core::{Config, Corpus};

/// URI prefix for corpus syntax documents.
pub const SYNTAX_URI_PREFIX: &str = "mmdocs://syntax/";
/// Fallback prefix accepted from clients that rewrite custom schemes.
pub const FALLBACK_SYNTAX_URI_PREFIX: &str = "resource://mmdocs/syntax/";

/// Where a resource's content comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceBacking {
    /// A document held in the in-memory corpus.
    CorpusDocument {
        /// Corpus document id (e.g. `flowchart.md`).
        id: String,
    },
    /// A file under the guides directory, read on demand.
    GuideFile {
        /// File name relative to the guides directory.
        file: String,
    },
}

/// One exposable resource.
#[derive(Debug, Clone)]
pub struct ResourceBinding {
    /// URI the resource is served under.
    pub uri: String,
    /// Short display name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Content source.
    pub backing: ResourceBacking,
}

/// Build the full resource table from the corpus and configuration.
///
/// Corpus documents come first in load order, followed by configured extras
/// in declaration order.
#[must_use]
pub fn build_bindings(corpus: &Corpus, config: &Config) -> Vec<ResourceBinding> {
    let mut bindings = Vec::with_capacity(corpus.len() + config.extras.len());

    for doc in corpus {
        let stem = doc.id.trim_end_matches(".md");
        bindings.push(ResourceBinding {
            uri: format!("{SYNTAX_URI_PREFIX}{stem}"),
            name: stem.to_string(),
            description: format!("{stem} syntax documentation"),
            backing: ResourceBacking::CorpusDocument { id: doc.id.clone() },
        });
    }

    for extra in &config.extras {
        bindings.push(ResourceBinding {
            uri: extra.uri.clone(),
            name: extra.name.clone(),
            description: extra.description.clone(),
            backing: ResourceBacking::GuideFile {
                file: extra.file.clone(),
            },
        });
    }

    bindings
}

/// Resolve a request URI against the binding table.
///
/// The fallback `resource://mmdocs/syntax/` scheme is accepted as an alias
/// for the primary scheme.
#[must_use]
pub fn resolve<'a>(bindings: &'a [ResourceBinding], uri: &str) -> Option<&'a ResourceBinding> {
    let canonical = uri
        .strip_prefix(FALLBACK_SYNTAX_URI_PREFIX)
        .map(|rest| format!("{SYNTAX_URI_PREFIX}{rest}"));
    let uri = canonical.as_deref().unwrap_or(uri);

    bindings.iter().find(|binding| binding.uri == uri)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use mmdocs_core::{Document, ExtraDoc};

    fn corpus() -> Corpus {
        Corpus::from_documents(vec![
            Document {
                id: "flowchart.md".to_string(),
                text: "# Flowcharts".to_string(),
            },
            Document {
                id: "pie.md".to_string(),
                text: "# Pie".to_string(),
            },
        ])
    }

    fn config_with_extra() -> Config {
        let mut config = Config::default();
        config.extras.push(ExtraDoc {
            name: "cheatsheet".to_string(),
            uri: "mmdocs://guides/cheatsheet".to_string(),
            file: "cheatsheet.md".to_string(),
            description: "Quick syntax reference".to_string(),
        });
        config
    }

    #[test]
    fn test_bindings_cover_corpus_then_extras() {
        let bindings = build_bindings(&corpus(), &config_with_extra());

        assert_eq!(bindings.len(), 3);
        assert_eq!(bindings[0].uri, "mmdocs://syntax/flowchart");
        assert_eq!(bindings[0].name, "flowchart");
        assert_eq!(bindings[1].uri, "mmdocs://syntax/pie");
        assert_eq!(bindings[2].uri, "mmdocs://guides/cheatsheet");
        assert_eq!(
            bindings[2].backing,
            ResourceBacking::GuideFile {
                file: "cheatsheet.md".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_primary_and_fallback_scheme() {
        let bindings = build_bindings(&corpus(), &Config::default());

        assert!(resolve(&bindings, "mmdocs://syntax/pie").is_some());
        assert!(resolve(&bindings, "resource://mmdocs/syntax/pie").is_some());
        assert!(resolve(&bindings, "mmdocs://syntax/unknown").is_none());
        assert!(resolve(&bindings, "https://example.com/pie").is_none());
    }
}
