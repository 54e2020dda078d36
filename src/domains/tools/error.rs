//! Tool-specific error types.
//!
//! Two families live here. [`ToolError`] covers registry-level failures that
//! propagate to the transport as hard errors. [`HandlerFault`] covers anything
//! that goes wrong while a handler runs; the registry turns those into text
//! content instead of letting them escape.

use thiserror::Error;

/// Registry-level errors that are surfaced to the caller as hard failures.
#[derive(Debug, Error)]
pub enum ToolError {
    /// A tool with the same name has already been registered.
    #[error("Tool already registered: {0}")]
    DuplicateTool(String),

    /// The requested tool was not found.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

impl ToolError {
    /// Create a new "duplicate tool" error.
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateTool(name.into())
    }

    /// Create a new "unknown tool" error.
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }
}

/// A failure raised by a tool handler while doing its work.
///
/// Handlers return these through `?`; the registry renders them as
/// `Error <activity> "<input>": <message>`.
#[derive(Debug, Error)]
pub enum HandlerFault {
    /// Transport-level failure talking to an upstream service.
    ///
    /// Built through `From`, which drops the request URL so query secrets
    /// never reach fault text.
    #[error("{0}")]
    Http(reqwest::Error),

    /// The upstream service answered with a non-success status.
    #[error("{0}")]
    Status(String),

    /// The upstream payload could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The arguments passed validation but cannot be acted on together.
    #[error("{0}")]
    InvalidInput(String),

    /// Any other failure.
    #[error("{0}")]
    Other(String),
}

impl HandlerFault {
    /// Create a new "status" fault.
    pub fn status(msg: impl Into<String>) -> Self {
        Self::Status(msg.into())
    }

    /// Create a new "decode" fault.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a new "invalid input" fault.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new catch-all fault.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

impl From<reqwest::Error> for HandlerFault {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}

impl From<serde_json::Error> for HandlerFault {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_error_messages() {
        assert_eq!(
            ToolError::duplicate("echo").to_string(),
            "Tool already registered: echo"
        );
        assert_eq!(ToolError::unknown("missing").to_string(), "Unknown tool: missing");
    }

    #[test]
    fn test_fault_from_json_error_is_decode() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let fault = HandlerFault::from(err);
        assert!(matches!(fault, HandlerFault::Decode(_)));
        assert!(fault.to_string().starts_with("Failed to decode response"));
    }

    #[test]
    fn test_status_fault_keeps_message() {
        let fault = HandlerFault::status("HTTP error! status: 503");
        assert_eq!(fault.to_string(), "HTTP error! status: 503");
    }

    #[tokio::test]
    async fn test_http_fault_drops_request_url() {
        let err = reqwest::get("http://127.0.0.1:1/v1/search?name=Oslo&apikey=SECRET42")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("SECRET42"));

        let fault = HandlerFault::from(err);
        assert!(matches!(fault, HandlerFault::Http(_)));
        assert!(!fault.to_string().contains("SECRET42"));
        assert!(!fault.to_string().contains("127.0.0.1"));
    }
}
