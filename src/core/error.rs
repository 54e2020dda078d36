//! Error types for the MCP server.
//!
//! Tool-level failures are reported to clients as text and never reach this
//! type; `Error` covers startup and transport failures only.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Error raised while running a transport.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::ToolError;

    #[test]
    fn test_tool_error_converts() {
        let err: Error = ToolError::unknown("nope").into();
        assert_eq!(err.to_string(), "Tool error: Unknown tool: nope");
    }

    #[test]
    fn test_config_error_message() {
        assert_eq!(
            Error::config("bad port").to_string(),
            "Configuration error: bad port"
        );
    }

    #[test]
    fn test_transport_error_converts() {
        let err: Error = crate::core::transport::TransportError::init("stdin closed").into();
        assert_eq!(
            err.to_string(),
            "Transport error: Server initialization error: stdin closed"
        );
    }
}
