//! Response envelope returned by every tool invocation.

use rmcp::model::{CallToolResult, Content};
use serde::{Deserialize, Serialize};

/// A single unit of response payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    /// Plain text.
    Text { text: String },
}

impl ContentBlock {
    /// Create a text block.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Borrow the text payload.
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text { text } => text,
        }
    }
}

/// The uniform envelope: a non-empty list of content blocks.
///
/// There is no empty constructor, so a `ToolResult` always carries at least
/// one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolResult {
    content: Vec<ContentBlock>,
}

impl ToolResult {
    /// Create a result holding a single text block.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(text)],
        }
    }

    /// The content blocks, in order.
    pub fn content(&self) -> &[ContentBlock] {
        &self.content
    }

    /// Text of the first block.
    pub fn first_text(&self) -> &str {
        self.content[0].as_text()
    }

    /// JSON shape used by the HTTP transport for `tools/call`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "content": self.content,
            "isError": false
        })
    }
}

impl From<ToolResult> for CallToolResult {
    fn from(result: ToolResult) -> Self {
        let content = result
            .content
            .into_iter()
            .map(|block| match block {
                ContentBlock::Text { text } => Content::text(text),
            })
            .collect();
        CallToolResult::success(content)
    }
}
