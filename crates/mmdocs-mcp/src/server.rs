//! MCP server implementation for mmdocs

use std::sync::Arc;

use mmdocs_core::{Config, MmdcOracle, RenderOracle, SharedCorpus};
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    AnnotateAble, CallToolResult, Content, GetPromptRequestParam, GetPromptResult, Implementation,
    ListPromptsResult, ListResourcesResult, PaginatedRequestParam, Prompt, PromptMessage,
    PromptMessageRole, ProtocolVersion, RawResource, ReadResourceRequestParam, ReadResourceResult,
    Resource, ResourceContents, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData, RoleServer, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use crate::error::{McpError, McpResult};
use crate::resources::{ResourceBacking, build_bindings, resolve};
use crate::tools::{
    self, AnalyzeParams, ExamplesReply, GetExamplesParams, SearchDocsParams, SearchResourceParams,
    ValidateParams,
};

/// MCP server exposing the documentation corpus, validator, and catalog.
#[derive(Clone)]
pub struct DocsServer {
    config: Arc<Config>,
    corpus: SharedCorpus,
    oracle: Option<Arc<dyn RenderOracle>>,
    tool_router: ToolRouter<Self>,
}

/// Serialize a payload into a successful tool result.
fn json_success<T: Serialize>(payload: &T) -> Result<CallToolResult, ErrorData> {
    let json = serde_json::to_string_pretty(payload)
        .map_err(|e| ErrorData::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Serialize a payload into a failed tool result (`isError` set).
fn json_failure<T: Serialize>(payload: &T) -> Result<CallToolResult, ErrorData> {
    let json = serde_json::to_string_pretty(payload)
        .map_err(|e| ErrorData::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::error(vec![Content::text(json)]))
}

/// Turn an internal error into a structured failure payload.
///
/// Callers always receive a result value with an error field; internal
/// failures never surface as protocol faults.
fn failure_from_error(error: &McpError) -> Result<CallToolResult, ErrorData> {
    tracing::debug!(error = %error, "tool call failed");
    json_failure(&serde_json::json!({ "error": error.to_string() }))
}

#[tool_router]
impl DocsServer {
    /// Create a server from the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration location cannot be resolved.
    pub fn new() -> McpResult<Self> {
        let config = Config::load()?;
        Ok(Self::with_config(config))
    }

    /// Create a server from an explicit configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        let corpus = SharedCorpus::new(config.docs_dir());
        let oracle: Option<Arc<dyn RenderOracle>> = if config.oracle.enabled {
            Some(Arc::new(MmdcOracle::with_command(
                config.oracle.command.clone(),
            )))
        } else {
            None
        };

        Self {
            config: Arc::new(config),
            corpus,
            oracle,
            tool_router: Self::tool_router(),
        }
    }

    /// Create a server around a pre-built corpus (used in tests).
    #[must_use]
    pub fn with_corpus(config: Config, corpus: SharedCorpus) -> Self {
        Self {
            config: Arc::new(config),
            corpus,
            oracle: None,
            tool_router: Self::tool_router(),
        }
    }

    /// Serve the MCP protocol over stdio.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails to initialize or the server
    /// terminates abnormally.
    pub async fn serve_stdio(&self) -> McpResult<()> {
        tracing::info!("mmdocs MCP server starting");

        let stdin = tokio::io::stdin();
        let stdout = tokio::io::stdout();

        let service = rmcp::serve_server(self.clone(), (stdin, stdout))
            .await
            .map_err(|e| {
                tracing::error!("server initialization error: {}", e);
                McpError::Protocol(e.to_string())
            })?;

        service.waiting().await.map_err(|e| {
            tracing::error!("server runtime error: {}", e);
            McpError::Protocol(e.to_string())
        })?;

        tracing::info!("mmdocs MCP server stopped");
        Ok(())
    }

    #[tool(
        name = "search_resource",
        description = "Search the official Mermaid documentation for specific patterns, keywords, or diagram types. Returns matching lines with context. After finding syntax, always validate the final diagram with the validate_mermaid tool."
    )]
    async fn search_resource(
        &self,
        Parameters(params): Parameters<SearchResourceParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let corpus = self.corpus.get_or_load().await;
        match tools::handle_search_resource(&corpus, params) {
            Ok(output) => json_success(&output),
            Err(e) => failure_from_error(&e),
        }
    }

    #[tool(
        name = "search_docs",
        description = "Search the Mermaid documentation and return minimal matching sections (snippet mode) or whole files (full mode), optionally filtered by diagram type."
    )]
    async fn search_docs(
        &self,
        Parameters(params): Parameters<SearchDocsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let corpus = self.corpus.get_or_load().await;
        match tools::handle_search_docs(&corpus, params) {
            Ok(output) => json_success(&output),
            Err(e) => failure_from_error(&e),
        }
    }

    #[tool(
        name = "validate_mermaid",
        description = "Validate Mermaid diagram syntax before presenting to users. Always use this tool after creating or modifying any diagram. Returns validation status, errors, and warnings; invalid diagrams will fail to render."
    )]
    async fn validate_mermaid(
        &self,
        Parameters(params): Parameters<ValidateParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let outcome = tools::handle_validate(params, self.oracle.as_deref()).await;
        if outcome.valid {
            json_success(&outcome)
        } else {
            json_failure(&outcome)
        }
    }

    #[tool(
        name = "list_diagram_types",
        description = "List all available Mermaid diagram types with descriptions. Use this to discover what diagram types are available."
    )]
    async fn list_diagram_types(&self) -> Result<CallToolResult, ErrorData> {
        json_success(&tools::handle_list_diagram_types())
    }

    #[tool(
        name = "get_examples",
        description = "Get working examples for a specific diagram type. After using examples to create your diagram, validate it with the validate_mermaid tool before showing it to users."
    )]
    async fn get_examples(
        &self,
        Parameters(params): Parameters<GetExamplesParams>,
    ) -> Result<CallToolResult, ErrorData> {
        match tools::handle_get_examples(&self.config.reference_path(), params) {
            Ok(ExamplesReply::Found(output)) => json_success(&output),
            Ok(ExamplesReply::NotFound(payload)) => json_failure(&payload),
            Err(e) => failure_from_error(&e),
        }
    }

    #[tool(
        name = "analyze_diagram",
        description = "Analyze a Mermaid diagram and provide insights about its structure, complexity, and suggestions for improvement. Includes validation checking."
    )]
    async fn analyze_diagram(
        &self,
        Parameters(params): Parameters<AnalyzeParams>,
    ) -> Result<CallToolResult, ErrorData> {
        json_success(&tools::handle_analyze(&params))
    }
}

#[tool_handler]
impl ServerHandler for DocsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: "mmdocs-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Search Mermaid documentation, retrieve examples, and validate diagram \
                 syntax. Validate every diagram with validate_mermaid before presenting it."
                    .to_string(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        let corpus = self.corpus.get_or_load().await;
        let resources: Vec<Resource> = build_bindings(&corpus, &self.config)
            .into_iter()
            .map(|binding| {
                let mut raw = RawResource::new(binding.uri, binding.name);
                raw.description = Some(binding.description);
                raw.mime_type = Some("text/markdown".to_string());
                raw.no_annotation()
            })
            .collect();

        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        let corpus = self.corpus.get_or_load().await;
        let bindings = build_bindings(&corpus, &self.config);

        let Some(binding) = resolve(&bindings, &request.uri) else {
            return Err(ErrorData::resource_not_found(
                format!("unknown resource: {}", request.uri),
                None,
            ));
        };

        let text = match &binding.backing {
            ResourceBacking::CorpusDocument { id } => corpus.get(id).map_or_else(
                || format!("Documentation file not found: {id}"),
                |doc| doc.text.clone(),
            ),
            ResourceBacking::GuideFile { file } => {
                let path = self.config.guide_path(file);
                std::fs::read_to_string(&path).unwrap_or_else(|e| {
                    tracing::warn!(path = %path.display(), error = %e, "resource file unavailable");
                    format!("Resource file not found: {file}")
                })
            },
        };

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, binding.uri.clone())],
        })
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, ErrorData> {
        let prompts: Vec<Prompt> = self
            .config
            .prompts
            .iter()
            .map(|entry| Prompt::new(&entry.name, Some(&entry.description), None))
            .collect();

        Ok(ListPromptsResult {
            prompts,
            next_cursor: None,
        })
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, ErrorData> {
        let Some(entry) = self
            .config
            .prompts
            .iter()
            .find(|entry| entry.name == request.name)
        else {
            return Err(ErrorData::invalid_params(
                format!("unknown prompt: {}", request.name),
                None,
            ));
        };

        let path = self.config.guide_path(&entry.file);
        let text = std::fs::read_to_string(&path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "prompt file unavailable");
            format!("Prompt file not found: {}", entry.file)
        });

        Ok(GetPromptResult {
            description: Some(entry.description.clone()),
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, text)],
        })
    }
}
