//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - Registration of named tools (schema + handler), rejecting duplicates
//! - A single invocation path: lookup, validate, execute, normalize
//! - Tool metadata for listing
//!
//! The registry is filled once at start-up and then shared read-only behind
//! an `Arc`, so concurrent invocations need no locking.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::Tool;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::content::ToolResult;
use super::context::InvocationContext;
use super::error::ToolError;
use super::handlers::ToolHandler;
use super::schema::ToolSchema;

// ============================================================================
// Tool Definition
// ============================================================================

/// A named tool: its schema and the handler that implements it.
#[derive(Clone)]
pub struct ToolDefinition {
    name: String,
    schema: ToolSchema,
    handler: Arc<dyn ToolHandler>,
}

impl ToolDefinition {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        self.schema.description()
    }

    pub fn schema(&self) -> &ToolSchema {
        &self.schema
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.clone().into(),
            description: Some(self.schema.description().to_string().into()),
            input_schema: Arc::new(self.schema.to_json_schema()),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

impl std::fmt::Debug for ToolDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.name)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - owns every tool and the one path for invoking them.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool.
    ///
    /// Fails with [`ToolError::DuplicateTool`] if `name` is already taken.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        schema: ToolSchema,
        handler: impl ToolHandler + 'static,
    ) -> Result<(), ToolError> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(ToolError::duplicate(name));
        }

        debug!("Registering tool: {}", name);
        self.index.insert(name.clone(), self.tools.len());
        self.tools.push(ToolDefinition {
            name,
            schema,
            handler: Arc::new(handler),
        });
        Ok(())
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Get all tool names, in registration order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    /// All definitions, in registration order.
    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.tools
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools(&self) -> Vec<Tool> {
        self.tools.iter().map(ToolDefinition::to_tool).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Invoke a tool by name.
    ///
    /// Only an unknown `name` produces `Err`. Validation failures and
    /// handler faults both come back as a single-block [`ToolResult`]; the
    /// handler runs at most once and only with arguments that passed
    /// validation.
    #[instrument(skip(self, arguments, context), fields(transport = %context.transport()))]
    pub async fn invoke(
        &self,
        name: &str,
        arguments: &Value,
        context: &InvocationContext,
    ) -> Result<ToolResult, ToolError> {
        let tool = self.get(name).ok_or_else(|| {
            warn!("Unknown tool requested: {}", name);
            ToolError::unknown(name)
        })?;

        let validated = match tool.schema.validate(&tool.name, arguments) {
            Ok(args) => args,
            Err(e) => {
                warn!(violations = e.violations.len(), "Rejected arguments for {}", name);
                return Ok(ToolResult::text(e.to_string()));
            }
        };

        info!("Invoking tool: {}", name);
        match tool.handler.call(&validated, context).await {
            Ok(result) => Ok(result),
            Err(fault) => {
                let subject = tool.handler.subject(&validated);
                warn!("Tool {} failed: {}", name, fault);
                Ok(ToolResult::text(format!(
                    "Error {} \"{}\": {}",
                    tool.handler.activity(),
                    subject,
                    fault
                )))
            }
        }
    }
}
