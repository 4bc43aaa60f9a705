//! Error types for the mmdocs MCP server with MCP error code mapping

use thiserror::Error;

/// Errors that can occur in the MCP server
#[derive(Debug, Error)]
pub enum McpError {
    /// Core operation failed
    #[error("core error: {0}")]
    Core(#[from] mmdocs_core::Error),

    /// JSON serialization/deserialization error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Protocol error
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParams(String),
}

impl McpError {
    /// Map error to MCP error code
    pub const fn error_code(&self) -> i32 {
        match self {
            Self::Internal(_) | Self::Protocol(_) => -32603, // Internal error
            Self::Json(_) => -32700,                         // Parse error
            Self::InvalidParams(_) => -32602,                // Invalid params
            Self::Core(e) => match e {
                mmdocs_core::Error::InvalidInput(_) | mmdocs_core::Error::NotFound(_) => -32602,
                _ => -32603,
            },
        }
    }
}

impl From<anyhow::Error> for McpError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Result type alias for MCP operations
pub type McpResult<T> = Result<T, McpError>;
