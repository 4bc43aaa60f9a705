//! Binary entry point for the mmdocs MCP server.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    mmdocs_mcp::serve_stdio().await?;
    Ok(())
}
