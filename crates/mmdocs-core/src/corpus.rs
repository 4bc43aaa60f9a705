//! In-memory documentation corpus.
//!
//! The corpus is a fixed set of markdown documents loaded once from disk and
//! read-only thereafter. Loading is partial-success: an unreadable file is
//! logged and skipped, never aborting the rest of the load. [`SharedCorpus`]
//! adds at-most-once lazy initialization so that concurrent callers arriving
//! before the load completes all observe the same finished corpus.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, warn};

/// A single documentation file held in memory.
#[derive(Debug, Clone)]
pub struct Document {
    /// Document identifier (the source file name, e.g. `flowchart.md`).
    pub id: String,
    /// Full text content.
    pub text: String,
}

/// An insertion-ordered, read-only collection of documents.
#[derive(Debug, Default)]
pub struct Corpus {
    docs: Vec<Document>,
    by_id: HashMap<String, usize>,
}

impl Corpus {
    /// Build a corpus from pre-loaded documents, preserving order.
    ///
    /// A duplicate id replaces the earlier document in place (last write
    /// wins) without disturbing iteration order.
    #[must_use]
    pub fn from_documents(documents: Vec<Document>) -> Self {
        let mut corpus = Self::default();
        for doc in documents {
            if let Some(&idx) = corpus.by_id.get(&doc.id) {
                warn!(id = %doc.id, "duplicate document id, replacing earlier copy");
                corpus.docs[idx] = doc;
            } else {
                corpus.by_id.insert(doc.id.clone(), corpus.docs.len());
                corpus.docs.push(doc);
            }
        }
        corpus
    }

    /// Load every `*.md` file from a directory, in sorted filename order.
    ///
    /// Sorting makes load order (and therefore search enumeration order)
    /// deterministic across platforms. Individual read failures are logged
    /// and skipped; a missing directory yields an empty corpus.
    #[must_use]
    pub fn load_dir(dir: &Path) -> Self {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "documentation directory unavailable");
                return Self::default();
            },
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
            .collect();
        paths.sort();

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let Some(id) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            match std::fs::read_to_string(&path) {
                Ok(text) => documents.push(Document {
                    id: id.to_string(),
                    text,
                }),
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "skipping unreadable document");
                },
            }
        }

        debug!(count = documents.len(), dir = %dir.display(), "corpus loaded");
        Self::from_documents(documents)
    }

    /// Look up a document by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.by_id.get(id).map(|&idx| &self.docs[idx])
    }

    /// Iterate documents in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.docs.iter()
    }

    /// Number of loaded documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Whether the corpus holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.docs.iter()
    }
}

/// Cloneable handle to a lazily-loaded corpus.
///
/// The first call to [`get_or_load`](Self::get_or_load) performs the load;
/// concurrent callers all await that same load and receive the same
/// `Arc<Corpus>`. No caller can observe a partially-populated corpus: the
/// staging [`Corpus`] is only published once fully built.
#[derive(Clone)]
pub struct SharedCorpus {
    docs_dir: PathBuf,
    cell: Arc<OnceCell<Arc<Corpus>>>,
}

impl SharedCorpus {
    /// Create a handle that will load from the given directory on first use.
    #[must_use]
    pub fn new(docs_dir: PathBuf) -> Self {
        Self {
            docs_dir,
            cell: Arc::new(OnceCell::new()),
        }
    }

    /// Create a handle around an already-built corpus (used in tests and by
    /// composition roots that load eagerly).
    #[must_use]
    pub fn preloaded(corpus: Corpus) -> Self {
        let cell = OnceCell::new();
        // A fresh cell cannot already be set.
        let _ = cell.set(Arc::new(corpus));
        Self {
            docs_dir: PathBuf::new(),
            cell: Arc::new(cell),
        }
    }

    /// Get the corpus, loading it on first call.
    pub async fn get_or_load(&self) -> Arc<Corpus> {
        Arc::clone(
            self.cell
                .get_or_init(|| {
                    let dir = self.docs_dir.clone();
                    async move {
                        let loaded = tokio::task::spawn_blocking(move || Corpus::load_dir(&dir))
                            .await
                            .unwrap_or_else(|e| {
                                warn!(error = %e, "corpus load task failed");
                                Corpus::default()
                            });
                        Arc::new(loaded)
                    }
                })
                .await,
        )
    }
}
