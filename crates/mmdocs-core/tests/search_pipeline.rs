//! End-to-end scenarios over a real documentation tree on disk.

#![allow(clippy::unwrap_used)]

use mmdocs_core::{
    Corpus, LineSearchQuery, SearchMode, SectionSearchQuery, SharedCorpus, line_search,
    section_search, validate_structure,
};

const FLOWCHART_DOC: &str = "# Flowcharts - Basic Syntax\n\
\n\
Flowcharts are composed of nodes and edges.\n\
\n\
## Edges\n\
\n\
### Links with arrows\n\
\n\
Arrows can be used to show direction.\n";

const SEQUENCE_DOC: &str = "# Sequence Diagrams\n\
\n\
## Participants\n\
\n\
Use the participant keyword to declare actors.\n";

fn write_docs(dir: &std::path::Path) {
    std::fs::write(dir.join("flowchart.md"), FLOWCHART_DOC).unwrap();
    std::fs::write(dir.join("sequenceDiagram.md"), SEQUENCE_DOC).unwrap();
}

#[tokio::test]
async fn search_pipeline_over_loaded_tree() {
    let dir = tempfile::tempdir().unwrap();
    write_docs(dir.path());

    let shared = SharedCorpus::new(dir.path().to_path_buf());
    let corpus = shared.get_or_load().await;
    assert_eq!(corpus.len(), 2);

    // Line-indexed search finds the match with context on both sides.
    let results = line_search(
        &corpus,
        &LineSearchQuery {
            term: "arrows".to_string(),
            case_sensitive: false,
            max_hits: 50,
            context_radius: 2,
        },
    )
    .unwrap();

    assert_eq!(results.total_documents, 1);
    assert_eq!(results.documents[0].id, "flowchart.md");
    let window = &results.documents[0].matches[0];
    assert_eq!(window.before.len(), 2);
    let rendered = window.render();
    assert!(rendered.iter().any(|line| line.starts_with(">>> ")));

    // Section-indexed search returns the header-delimited excerpt.
    let results = section_search(
        &corpus,
        &SectionSearchQuery {
            term: "arrows".to_string(),
            category: None,
            mode: SearchMode::Snippet,
            case_sensitive: false,
            max_documents: 5,
        },
    )
    .unwrap();

    assert_eq!(results.total_documents, 1);
    let excerpt = &results.documents[0].excerpt;
    assert!(excerpt.starts_with("### Links with arrows"));
    assert!(excerpt.contains("Arrows can be used"));
    assert!(!excerpt.contains("# Sequence"));
}

#[tokio::test]
async fn repeated_searches_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    write_docs(dir.path());

    let shared = SharedCorpus::new(dir.path().to_path_buf());
    let corpus = shared.get_or_load().await;

    let query = SectionSearchQuery {
        term: "diagram".to_string(),
        category: None,
        mode: SearchMode::Full,
        case_sensitive: false,
        max_documents: 20,
    };

    let render = |corpus: &Corpus| {
        let results = section_search(corpus, &query).unwrap();
        results
            .documents
            .iter()
            .map(|d| format!("{}:{}:{}", d.id, d.match_count, d.excerpt))
            .collect::<Vec<_>>()
            .join("\u{1f}")
    };

    assert_eq!(render(&corpus), render(&corpus));
}

#[test]
fn validator_scenarios_from_the_contract() {
    // Empty input.
    let outcome = validate_structure("");
    assert!(!outcome.valid);
    assert!(outcome.error.unwrap().contains("Empty"));

    // Unbalanced brackets report exact counts.
    let outcome = validate_structure("flowchart LR\n A[Start --> B[End]");
    assert!(!outcome.valid);
    let error = outcome.error.unwrap();
    assert!(error.contains('2') && error.contains('1'));

    // A recognized keyword plus balanced delimiters passes cleanly.
    let outcome = validate_structure("flowchart LR\n A[Start] --> B[End]");
    assert!(outcome.valid);
    assert!(outcome.error.is_none());
}
