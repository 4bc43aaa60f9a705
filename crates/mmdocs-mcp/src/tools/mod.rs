//! MCP tools for mmdocs

pub mod catalog;
pub mod search;
pub mod validate;

pub use catalog::{
    ExamplesReply, GetExamplesParams, ListDiagramTypesOutput, handle_get_examples,
    handle_list_diagram_types,
};
pub use search::{
    SearchDocsOutput, SearchDocsParams, SearchResourceOutput, SearchResourceParams,
    handle_search_docs, handle_search_resource,
};
pub use validate::{AnalyzeParams, ValidateParams, handle_analyze, handle_validate};
