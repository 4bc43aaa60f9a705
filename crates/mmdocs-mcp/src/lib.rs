//! mmdocs MCP Server
//!
//! A Rust-native MCP (Model Context Protocol) server exposing Mermaid
//! documentation search, diagram examples, and syntax validation.

pub mod error;
pub mod resources;
pub mod server;
pub mod tools;

pub use error::{McpError, McpResult};
pub use server::DocsServer;

/// Main entry point for the MCP server
///
/// This function creates and runs the MCP server over stdio.
///
/// # Errors
///
/// Returns an error if the server fails to initialize or run.
pub async fn serve_stdio() -> McpResult<()> {
    // Initialize tracing; stdout is reserved for the protocol.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("initializing mmdocs MCP server");

    let server = DocsServer::new()?;
    server.serve_stdio().await
}
